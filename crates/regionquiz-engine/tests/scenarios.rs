use regionquiz_engine::{
    BoundingBox, DrawMode, EditorState, GameType, ImageGame, PlaySession, Point, Region, RegionId,
    ShuffleSeed, Size,
};

fn carbon_game(regions: Vec<Region>) -> ImageGame {
    ImageGame {
        id: "carbon".to_owned(),
        title: "Karbonun allotropları".to_owned(),
        description: Some("Allotropları resimde işaretleyin".to_owned()),
        image_url: "https://example.com/carbon.png".to_owned(),
        topic_id: Some("chemistry".to_owned()),
        subject_id: Some("science".to_owned()),
        game_type: GameType::Standard,
        regions,
    }
}

fn two_rectangles() -> ImageGame {
    carbon_game(vec![
        Region::rectangle("r1", "Elmas", BoundingBox::new(0.0, 0.0, 10.0, 10.0)),
        Region::rectangle("r2", "Grafit", BoundingBox::new(20.0, 0.0, 10.0, 10.0)),
    ])
}

fn start(game: ImageGame) -> PlaySession {
    let mut session = PlaySession::with_seed(game, ShuffleSeed::from_bytes([11; 16]));
    session.image_loaded(Size::new(100.0, 100.0));
    session
}

#[test]
fn test_all_correct_scores_100() {
    let mut session = start(two_rectangles());
    assert_eq!(session.available_labels().len(), 2);

    session.select_label("Elmas").unwrap();
    session.try_place_at(Point::new(5.0, 5.0)).unwrap();
    assert_eq!(session.assignments().get(&RegionId::from("r1")), Some("Elmas"));
    assert_eq!(session.available_labels(), ["Grafit"]);

    session.select_label("Grafit").unwrap();
    session.try_place_at(Point::new(25.0, 5.0)).unwrap();
    assert_eq!(session.assignments().len(), 2);
    assert!(session.available_labels().is_empty());

    assert_eq!(session.try_submit().unwrap().percent(), 100);
    assert!(!session.can_reveal());
}

#[test]
fn test_swapped_labels_score_0() {
    let mut session = start(two_rectangles());

    session.select_label("Elmas").unwrap();
    session.try_place_at(Point::new(25.0, 5.0)).unwrap();
    session.select_label("Grafit").unwrap();
    session.try_place_at(Point::new(5.0, 5.0)).unwrap();

    assert_eq!(session.try_submit().unwrap().percent(), 0);
    assert!(session.reveal());
    assert!(session.is_revealed());
}

#[test]
fn test_label_count_is_conserved() {
    let game = carbon_game(vec![
        Region::rectangle("r1", "Elmas", BoundingBox::new(0.0, 0.0, 10.0, 10.0)),
        Region::rectangle("r2", "Grafit", BoundingBox::new(20.0, 0.0, 10.0, 10.0)),
        Region::rectangle("r3", "Fulleren", BoundingBox::new(40.0, 0.0, 10.0, 10.0)),
    ]);
    let mut session = start(game);
    let total = |s: &PlaySession| s.assignments().len() + s.available_labels().len();

    for (label, x) in [("Fulleren", 5.0), ("Elmas", 25.0), ("Grafit", 45.0)] {
        session.select_label(label).unwrap();
        session.try_place_at(Point::new(x, 5.0)).unwrap();
        assert_eq!(total(&session), 3);
    }
    for region in ["r2", "r1"] {
        session.remove_placement(&RegionId::from(region)).unwrap();
        assert_eq!(total(&session), 3);
    }

    let mut labels = session.available_labels().to_vec();
    labels.extend(session.assignments().iter().map(|(_, l)| l.to_owned()));
    labels.sort();
    assert_eq!(labels, ["Elmas", "Fulleren", "Grafit"]);
}

#[test]
fn test_scaled_surface_clicks() {
    let mut session = PlaySession::with_seed(two_rectangles(), ShuffleSeed::from_bytes([2; 16]));
    session.image_loaded(Size::new(300.0, 150.0));

    // Rendered at 100x50, a third of native size on both axes.
    let rendered = Size::new(100.0, 50.0);
    session.select_label("Grafit").unwrap();
    assert_eq!(
        session.click(Point::new(8.0, 1.0), rendered).unwrap(),
        RegionId::from("r2")
    );
}

#[test]
fn test_author_then_play() {
    let mut editor = EditorState::new();

    editor.pointer_down(Point::new(30.0, 30.0));
    editor.pointer_move(Point::new(10.0, 20.0));
    let rect = editor.pointer_up(Point::new(0.0, 0.0)).unwrap();
    editor.set_label(&rect, "Elmas").unwrap();

    editor.set_draw_mode(DrawMode::Polygon);
    for (x, y) in [(50.0, 0.0), (80.0, 0.0), (65.0, 30.0)] {
        editor.pointer_down(Point::new(x, y));
    }
    let tri = editor.finish_polygon().unwrap();
    editor.set_label(&tri, "Grafit").unwrap();

    editor.validate().unwrap();
    let game = carbon_game(editor.into_regions());
    game.validate().unwrap();

    let json = serde_json::to_string(&game).unwrap();
    let game: ImageGame = serde_json::from_str(&json).unwrap();

    let mut session = start(game);
    session.select_label("Grafit").unwrap();
    // Inside the triangle's bounding box but outside the triangle.
    assert!(session.try_place_at(Point::new(52.0, 28.0)).is_err());
    session.try_place_at(Point::new(65.0, 10.0)).unwrap();

    session.select_label("Elmas").unwrap();
    session.try_place_at(Point::new(15.0, 15.0)).unwrap();

    assert!(session.try_submit().unwrap().is_perfect());
}

#[test]
fn test_identical_order_gives_identical_colors() {
    let play = || {
        let mut session = start(two_rectangles());
        session.select_label("Grafit").unwrap();
        session.try_place_at(Point::new(5.0, 5.0)).unwrap();
        session.select_label("Elmas").unwrap();
        session.try_place_at(Point::new(25.0, 5.0)).unwrap();
        session
    };
    let (a, b) = (play(), play());
    for id in ["r1", "r2"] {
        let id = RegionId::from(id);
        assert_eq!(a.assignments().color_of(&id), b.assignments().color_of(&id));
    }
}
