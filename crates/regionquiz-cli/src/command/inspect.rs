use std::path::PathBuf;

use regionquiz_engine::RegionShape;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InspectArg {
    /// Path to the image game file (JSON format)
    game_path: PathBuf,
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let InspectArg { game_path } = arg;

    let game = util::read_game_file(game_path)?;

    println!("{} ({})", game.title, game.id);
    if let Some(description) = &game.description {
        println!("  {description}");
    }
    println!("image: {}", game.image_url);
    println!(
        "type: {}",
        if game.game_type.is_text_cover() {
            "text-cover"
        } else {
            "standard"
        }
    );
    println!("regions: {}", game.regions.len());
    for region in &game.regions {
        let b = region.bounding_box();
        let shape = match region.shape() {
            RegionShape::Rectangle => "rectangle".to_owned(),
            RegionShape::Polygon { points } => format!("polygon/{}", points.len()),
        };
        println!(
            "  {:<12} {:<12} {shape:<12} box=({}, {}) {}x{}",
            region.id().as_str(),
            region.label(),
            b.x,
            b.y,
            b.width,
            b.height
        );
    }
    Ok(())
}
