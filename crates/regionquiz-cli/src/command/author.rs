use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context as _, bail};
use regionquiz_engine::{DrawMode, EditorState, GameType, ImageGame, Region, RegionId};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AuthorArg {
    /// Game title
    #[clap(long)]
    title: String,
    /// URL or path of the image the regions are drawn on
    #[clap(long)]
    image_url: String,
    /// Game id; defaults to the title in lower kebab case
    #[clap(long)]
    id: Option<String>,
    #[clap(long)]
    description: Option<String>,
    /// Topic the game belongs to
    #[clap(long)]
    topic: Option<String>,
    /// Subject the game belongs to
    #[clap(long)]
    subject: Option<String>,
    /// Cover assigned regions with their label while playing
    #[clap(long)]
    text_cover: bool,
    /// Existing game file whose regions are loaded into the editor
    #[clap(long)]
    input: Option<PathBuf>,
    /// Output file path for the game (JSON format); defaults to stdout
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AuthorArg) -> anyhow::Result<()> {
    let AuthorArg {
        title,
        image_url,
        id,
        description,
        topic,
        subject,
        text_cover,
        input,
        output,
    } = arg;

    let editor = match input {
        Some(path) => EditorState::with_regions(util::read_game_file(path)?.regions),
        None => EditorState::new(),
    };

    let mut shell = AuthorShell { editor };
    let stderr = io::stderr();
    let mut log_out = stderr.lock();
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read command from stdin")?;
        shell.execute(&line, &mut log_out)?;
    }

    let game = ImageGame {
        id: id.clone().unwrap_or_else(|| slug(title)),
        title: title.clone(),
        description: description.clone(),
        image_url: image_url.clone(),
        topic_id: topic.clone(),
        subject_id: subject.clone(),
        game_type: if *text_cover {
            GameType::TextCover
        } else {
            GameType::Standard
        },
        regions: shell.finish(),
    };
    game.validate().context("Authored game is not playable")?;
    util::save_json(&game, output.as_deref())?;
    Ok(())
}

fn slug(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Clone, Copy, derive_more::FromStr)]
enum ModeArg {
    Rectangle,
    Polygon,
    Freehand,
}

impl From<ModeArg> for DrawMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Rectangle => DrawMode::Rectangle,
            ModeArg::Polygon => DrawMode::Polygon,
            ModeArg::Freehand => DrawMode::Freehand,
        }
    }
}

/// Line-oriented driver for the region editor
struct AuthorShell {
    editor: EditorState,
}

impl AuthorShell {
    fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> anyhow::Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let editor = &mut self.editor;

        match command {
            "mode" => {
                let mode = rest
                    .parse::<ModeArg>()
                    .map_err(|_| anyhow::anyhow!("unknown draw mode: {rest}"))?;
                editor.set_draw_mode(mode.into());
                writeln!(out, "mode: {}", editor.draw_mode())?;
            }
            "down" => editor.pointer_down(util::parse_point(rest.split_whitespace())?),
            "move" => editor.pointer_move(util::parse_point(rest.split_whitespace())?),
            "up" => {
                if let Some(id) = editor.pointer_up(util::parse_point(rest.split_whitespace())?) {
                    writeln!(out, "created {id}")?;
                }
            }
            "finish" => match editor.finish_polygon() {
                Ok(id) => writeln!(out, "created {id}")?,
                Err(e) => writeln!(out, "rejected: {e}")?,
            },
            "cancel" => editor.cancel(),
            "label" => {
                let Some((id, label)) = rest.split_once(' ') else {
                    bail!("expected label <id> <text>");
                };
                if let Err(e) = editor.set_label(&RegionId::from(id), label) {
                    writeln!(out, "rejected: {e}")?;
                }
            }
            "delete" => {
                if let Err(e) = editor.delete_region(&RegionId::from(rest)) {
                    writeln!(out, "rejected: {e}")?;
                }
            }
            "select" => {
                let point = util::parse_point(rest.split_whitespace())?;
                match editor.select_region_at(point) {
                    Some(id) => writeln!(out, "selected {id}")?,
                    None => writeln!(out, "selected nothing")?,
                }
            }
            "list" => {
                for region in editor.regions() {
                    writeln!(out, "{} {}", region.id(), region.label())?;
                }
            }
            _ => bail!("unknown command: {command}"),
        }
        Ok(())
    }

    fn finish(self) -> Vec<Region> {
        if !self.editor.phase().is_idle() {
            log::warn!("discarding unfinished shape");
        }
        self.editor.into_regions()
    }
}
