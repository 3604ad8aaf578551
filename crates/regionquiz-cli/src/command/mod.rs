use clap::{Parser, Subcommand};

use self::{author::AuthorArg, hit_test::HitTestArg, inspect::InspectArg, play::PlayArg};

mod author;
mod inspect;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Validate an image game file and list its regions
    Inspect(#[clap(flatten)] InspectArg),
    /// Resolve a pointer position to the region under it
    HitTest(#[clap(flatten)] HitTestArg),
    /// Play image games with commands read from stdin
    Play(#[clap(flatten)] PlayArg),
    /// Draw regions with commands read from stdin and save the game
    Author(#[clap(flatten)] AuthorArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Inspect(arg) => inspect::run(&arg)?,
        Mode::HitTest(arg) => hit_test::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Author(arg) => author::run(&arg)?,
    }
    Ok(())
}
