/// Console reporting of per-shape statistics and the end-of-run summary
use std::io::{self, Stdout, Write};

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use log::warn;
use meshshot_core::MeshStats;

use crate::config::ManifestEntry;
use crate::error::PipelineError;
use crate::pipeline::BatchReport;

/// Receives batch progress events
pub trait Reporter {
    fn shape_loaded(&mut self, entry: &ManifestEntry, stats: &MeshStats);
    fn shape_skipped(&mut self, entry: &ManifestEntry);
    fn shape_failed(&mut self, name: &str, error: &PipelineError);
    fn finished(&mut self, report: &BatchReport);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn shape_loaded(&mut self, _: &ManifestEntry, _: &MeshStats) {}
    fn shape_skipped(&mut self, _: &ManifestEntry) {}
    fn shape_failed(&mut self, _: &str, _: &PipelineError) {}
    fn finished(&mut self, _: &BatchReport) {}
}

/// Styled text report written to a terminal or any other writer
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn heading(&mut self, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(Color::Cyan),
            SetAttribute(Attribute::Bold),
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print("\n")
        )
    }

    fn line(&mut self, text: String) -> io::Result<()> {
        queue!(self.out, Print(text), Print("\n"))
    }

    fn warning(&mut self, text: String) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(Color::Yellow),
            Print(text),
            ResetColor,
            Print("\n")
        )
    }

    fn write_stats(&mut self, entry: &ManifestEntry, stats: &MeshStats) -> io::Result<()> {
        self.line(format!(
            "Loading {} from {}...",
            entry.display_name,
            entry.path.display()
        ))?;
        self.heading("\n=== Mesh Statistics ===")?;
        self.line(format!("Number of vertices: {}", stats.vertex_count))?;
        self.line(format!("Number of faces: {}", stats.face_count))?;
        self.line("Vertex bounds:".to_string())?;
        for (axis, i) in [("X", 0), ("Y", 1), ("Z", 2)] {
            self.line(format!(
                "  {axis}: [{:.3}, {:.3}]",
                stats.min[i], stats.max[i]
            ))?;
        }
        let (c, m, s) = (stats.center, stats.centroid, stats.size);
        self.line(format!("Mesh center: ({:.3}, {:.3}, {:.3})", c.x, c.y, c.z))?;
        self.line(format!("Mesh centroid: ({:.3}, {:.3}, {:.3})", m.x, m.y, m.z))?;
        self.line(format!("Mesh size: ({:.3}, {:.3}, {:.3})", s.x, s.y, s.z))?;
        self.out.flush()
    }

    fn write_summary(&mut self, report: &BatchReport) -> io::Result<()> {
        if report.written.is_empty() {
            self.warning("\nNo images written.".to_string())?;
        } else {
            self.heading("\nVisualization complete! Images written:")?;
            for path in &report.written {
                self.line(format!("  - {}", path.display()))?;
            }
        }
        if !report.failures.is_empty() {
            self.warning(format!("{} shape(s) failed", report.failures.len()))?;
        }
        self.out.flush()
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn shape_loaded(&mut self, entry: &ManifestEntry, stats: &MeshStats) {
        if let Err(e) = self.write_stats(entry, stats) {
            warn!("console report failed: {e}");
        }
    }

    fn shape_skipped(&mut self, entry: &ManifestEntry) {
        let text = format!(
            "Warning: {} not found, skipping {}",
            entry.path.display(),
            entry.display_name
        );
        if let Err(e) = self.warning(text).and_then(|_| self.out.flush()) {
            warn!("console report failed: {e}");
        }
    }

    fn shape_failed(&mut self, name: &str, error: &PipelineError) {
        let text = format!("Error: {name} failed: {error}");
        if let Err(e) = self.warning(text).and_then(|_| self.out.flush()) {
            warn!("console report failed: {e}");
        }
    }

    fn finished(&mut self, report: &BatchReport) {
        if let Err(e) = self.write_summary(report) {
            warn!("console report failed: {e}");
        }
    }
}
