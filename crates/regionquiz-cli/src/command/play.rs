use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context as _, bail};
use rand::Rng as _;
use regionquiz_engine::{
    AssignmentMap, ImageGame, PlaySession, RegionId, Score, SessionState, ShuffleSeed, Size,
    TopicSession,
};
use serde::Serialize;

use crate::util::{self, SizeArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Image game files (JSON format); several files are played in shuffled order
    #[clap(required = true)]
    game_paths: Vec<PathBuf>,
    /// Shuffle seed (32 hex characters) for a reproducible game order and label pool
    #[clap(long)]
    seed: Option<ShuffleSeed>,
    /// Only play games belonging to this topic id
    #[clap(long)]
    topic: Option<String>,
    /// Native image size (WIDTHxHEIGHT); defaults to the extent of each game's regions
    #[clap(long)]
    native: Option<SizeArg>,
    /// Size the image is rendered at (WIDTHxHEIGHT); defaults to the native size
    #[clap(long)]
    rendered: Option<SizeArg>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        game_paths,
        seed,
        topic,
        native,
        rendered,
    } = arg;

    let games = game_paths
        .iter()
        .map(util::read_game_file)
        .collect::<anyhow::Result<Vec<_>>>()?;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("shuffle seed: {}", serde_json::to_string(&seed)?);

    let topic_session = match topic {
        Some(topic) => TopicSession::for_topic(games, topic, seed)
            .with_context(|| format!("No games found for topic '{topic}'"))?,
        None => TopicSession::with_seed(games, seed).context("No games given")?,
    };

    let mut shell = PlayShell::new(
        topic_session,
        native.map(|SizeArg(s)| s),
        rendered.map(|SizeArg(s)| s),
    );
    let stdout = io::stdout();
    let mut out = stdout.lock();
    shell.print_intro(&mut out)?;
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read command from stdin")?;
        if !shell.execute(&line, &mut out)? {
            break;
        }
    }
    Ok(())
}

/// Snapshot of a play session printed by `status`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView<'a> {
    game: &'a str,
    state: &'static str,
    available_labels: &'a [String],
    assignments: &'a AssignmentMap,
    selected_label: Option<&'a str>,
    hovered_region_id: Option<&'a RegionId>,
    score: Option<Score>,
    revealed: bool,
}

impl<'a> StatusView<'a> {
    fn new(session: &'a PlaySession) -> Self {
        let state = match session.state() {
            SessionState::Loading => "loading",
            SessionState::InProgress => "in-progress",
            SessionState::Submitted(_) => "submitted",
            SessionState::Revealed(_) => "revealed",
        };
        Self {
            game: &session.game().id,
            state,
            available_labels: session.available_labels(),
            assignments: session.assignments(),
            selected_label: session.selected_label(),
            hovered_region_id: session.hovered_region(),
            score: session.score(),
            revealed: session.is_revealed(),
        }
    }
}

/// Line-oriented driver for a topic session
struct PlayShell {
    topic: TopicSession,
    native: Option<Size>,
    rendered: Option<Size>,
}

impl PlayShell {
    fn new(topic: TopicSession, native: Option<Size>, rendered: Option<Size>) -> Self {
        let mut this = Self {
            topic,
            native,
            rendered,
        };
        this.load_image();
        this
    }

    /// Stands in for the image host: reports the native size once "loaded"
    fn load_image(&mut self) {
        let native = self
            .native
            .unwrap_or_else(|| util::infer_native_size(self.topic.session().game()));
        self.topic.session_mut().image_loaded(native);
    }

    fn rendered_size(&self) -> Size {
        self.rendered
            .or_else(|| self.topic.session().native_size())
            .unwrap_or_default()
    }

    fn session(&mut self) -> &mut PlaySession {
        self.topic.session_mut()
    }

    fn print_intro<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let game: &ImageGame = self.topic.session().game();
        writeln!(
            out,
            "game {}/{}: {} ({})",
            self.topic.sequence().position() + 1,
            self.topic.sequence().len(),
            game.title,
            game.id
        )?;
        writeln!(out, "labels: {}", self.topic.session().available_labels().join(", "))?;
        Ok(())
    }

    /// Runs one command line. Returns `false` when the player quits.
    fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> anyhow::Result<bool> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(true);
        }
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "quit" | "exit" => return Ok(false),
            "labels" => {
                writeln!(out, "{}", self.topic.session().available_labels().join(", "))?;
            }
            "select" => match self.session().select_label(rest) {
                Ok(()) => writeln!(out, "selected '{rest}'")?,
                Err(e) => writeln!(out, "rejected: {e}")?,
            },
            "deselect" => self.session().deselect_label(),
            "click" => {
                let point = util::parse_point(rest.split_whitespace())?;
                let rendered = self.rendered_size();
                match self.session().click(point, rendered) {
                    Ok(id) => writeln!(out, "placed on {id}")?,
                    Err(e) => writeln!(out, "rejected: {e}")?,
                }
            }
            "hover" => {
                let point = util::parse_point(rest.split_whitespace())?;
                let rendered = self.rendered_size();
                match self.session().hover(point, rendered) {
                    Some(id) => writeln!(out, "hovering {id}")?,
                    None => writeln!(out, "hovering nothing")?,
                }
            }
            "leave" => self.session().clear_hover(),
            "remove" => match self.session().remove_placement(&RegionId::from(rest)) {
                Ok(label) => writeln!(out, "returned '{label}' to the pool")?,
                Err(e) => writeln!(out, "rejected: {e}")?,
            },
            "submit" => match self.session().try_submit() {
                Ok(score) => writeln!(out, "score: {score}")?,
                Err(e) => writeln!(out, "rejected: {e}")?,
            },
            "reveal" => {
                if self.session().reveal() {
                    self.print_outcomes(out)?;
                } else {
                    writeln!(out, "rejected: reveal is not available")?;
                }
            }
            "reset" => {
                self.session().reset();
                writeln!(out, "labels: {}", self.topic.session().available_labels().join(", "))?;
            }
            "next" => {
                self.topic.advance();
                self.load_image();
                self.print_intro(out)?;
            }
            "status" => {
                serde_json::to_writer(&mut *out, &StatusView::new(self.topic.session()))?;
                writeln!(out)?;
            }
            "views" => {
                serde_json::to_writer(&mut *out, &self.topic.session().region_views())?;
                writeln!(out)?;
            }
            _ => bail!("unknown command: {command}"),
        }
        Ok(true)
    }

    fn print_outcomes<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let session = self.topic.session();
        for view in session.region_views() {
            let outcome = match view.outcome {
                Some(o) if o.is_correct() => "correct",
                Some(_) => "incorrect",
                None => "-",
            };
            writeln!(
                out,
                "{}: {} -> {} ({outcome})",
                view.region.id(),
                view.assigned_label.unwrap_or("-"),
                view.region.label()
            )?;
        }
        Ok(())
    }
}
