use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
    str::FromStr,
};

use anyhow::{Context, bail};
use regionquiz_engine::{ImageGame, Point, Size};

/// Write `value` as pretty JSON to `output_path`, or to stdout if `None`
pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    match output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(BufWriter::new(file), value)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))
        }
        None => write_json(io::stdout().lock(), value).context("Failed to write JSON to stdout"),
    }
}

fn write_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: serde::Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Read and validate an image game from a JSON file
///
/// # Errors
///
/// Returns error if the file cannot be opened or parsed, or if the region
/// set fails authoring validation
pub fn read_game_file<P>(path: P) -> anyhow::Result<ImageGame>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open image game file: {}", path.display()))?;
    let game: ImageGame = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse image game file: {}", path.display()))?;
    game.validate()
        .with_context(|| format!("Invalid image game: {}", path.display()))?;
    Ok(game)
}

/// Smallest size covering every region, used when the image size is not given
pub fn infer_native_size(game: &ImageGame) -> Size {
    let (width, height) = game.regions.iter().fold((1.0_f64, 1.0_f64), |(w, h), r| {
        let b = r.bounding_box();
        (w.max(b.x + b.width), h.max(b.y + b.height))
    });
    Size::new(width, height)
}

/// A `WIDTHxHEIGHT` command-line argument
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeArg(pub Size);

impl FromStr for SizeArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((w, h)) = s.split_once(['x', 'X']) else {
            bail!("expected WIDTHxHEIGHT, got '{s}'");
        };
        let size = Size::new(
            w.trim().parse().with_context(|| format!("invalid width: {w}"))?,
            h.trim().parse().with_context(|| format!("invalid height: {h}"))?,
        );
        if !size.is_drawable() {
            bail!("size must be positive, got '{s}'");
        }
        Ok(Self(size))
    }
}

/// Parse the `<x> <y>` arguments of a script command
pub fn parse_point<'a>(mut args: impl Iterator<Item = &'a str>) -> anyhow::Result<Point> {
    let (Some(x), Some(y)) = (args.next(), args.next()) else {
        bail!("expected <x> <y>");
    };
    Ok(Point::new(
        x.parse().with_context(|| format!("invalid x: {x}"))?,
        y.parse().with_context(|| format!("invalid y: {y}"))?,
    ))
}
