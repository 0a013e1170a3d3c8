use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rhythmseed_core::{Dataset, InsertRow};

/// Render the dataset as `-- <table>` blocks of insert statements.
///
/// Each block ends with an empty line; tables follow the dependency order.
pub fn render_dataset(dataset: &Dataset) -> Vec<String> {
    let mut lines = Vec::new();
    push_table(&mut lines, &dataset.countries);
    push_table(&mut lines, &dataset.game_modes);
    push_table(&mut lines, &dataset.mods);
    push_table(&mut lines, &dataset.medals);
    push_table(&mut lines, &dataset.players);
    push_table(&mut lines, &dataset.beatmap_sets);
    push_table(&mut lines, &dataset.beatmaps);
    push_table(&mut lines, &dataset.plays);
    push_table(&mut lines, &dataset.play_mods);
    push_table(&mut lines, &dataset.player_medals);
    push_table(&mut lines, &dataset.player_stats);
    lines
}

fn push_table<T: InsertRow>(lines: &mut Vec<String>, rows: &[T]) {
    lines.reserve(rows.len() + 2);
    lines.push(format!("-- {}", T::TABLE));
    lines.extend(rows.iter().map(T::insert_statement));
    lines.push(String::new());
}

/// Write `lines` joined by newlines to `path`, replacing any existing file.
///
/// Returns the number of bytes written.
pub fn write_sql(path: &Path, lines: &[String]) -> std::io::Result<u64> {
    let file = File::create(path)?;
    let mut writer = CountingWriter::new(BufWriter::new(file));
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            writer.write_all(b"\n")?;
        }
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()?;
    Ok(writer.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
