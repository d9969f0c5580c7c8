use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;

use writer::cli::{CliArgs, Output, Source, StartupConfig};
use writer::{Editor, EditorConfig, Point};

fn main() -> Result<()> {
    writer::tracing::init();

    let startup = CliArgs::parse().into_config()?;
    let mut config = EditorConfig::load();
    startup.apply_to(&mut config);

    let editor = match &startup.source {
        Source::File(path) => Editor::open(path, config)?,
        Source::Stdin => Editor::from_reader(io::stdin().lock(), config)
            .context("Failed to read stdin")?,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match startup.output {
        Output::Rows => write_rows(&editor, &mut out)?,
        Output::Stats => write_stats(&editor, &mut out)?,
    }
    write_probe(&editor, &startup, &mut out)?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}

fn write_rows(editor: &Editor, out: &mut impl Write) -> Result<()> {
    for row in editor.document.screen_lines(0) {
        writeln!(out, "{}", row.text)?;
    }
    Ok(())
}

fn write_stats(editor: &Editor, out: &mut impl Write) -> Result<()> {
    let document = &editor.document;
    writeln!(out, "lines:  {}", document.line_count())?;
    writeln!(out, "rows:   {}", document.screen_line_count())?;
    writeln!(out, "chunks: {}", document.chunk_count())?;
    Ok(())
}

fn write_probe(editor: &Editor, startup: &StartupConfig, out: &mut impl Write) -> Result<()> {
    let Some((line, column)) = startup.probe else {
        return Ok(());
    };
    let document = &editor.document;
    if line >= document.line_count() {
        writeln!(out, "{}:{} is outside the document", line + 1, column + 1)?;
        return Ok(());
    }
    let point = Point::new(line, column.min(document.line_length(line)));
    if let Some(screen) = document.buffer_to_screen(point.line, point.column) {
        writeln!(
            out,
            "{}:{} -> row {}, column {}",
            point.line + 1,
            point.column + 1,
            screen.line + 1,
            screen.column + 1
        )?;
    }
    Ok(())
}
