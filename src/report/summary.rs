//! Preparation summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Summary of the dataset preparation process
#[derive(Debug, Default)]
pub struct PrepSummary {
    pub raw_rows: usize,
    pub raw_cols: usize,
    pub eligible_rows: usize,
    pub treated: usize,
    pub control: usize,
    pub encoded_cols: usize,
    pub train_rows: usize,
    pub valid_rows: usize,
    pub test_rows: usize,
}

impl PrepSummary {
    pub fn new(raw_rows: usize, raw_cols: usize) -> Self {
        Self {
            raw_rows,
            raw_cols,
            ..Default::default()
        }
    }

    pub fn set_eligible_rows(&mut self, rows: usize) {
        self.eligible_rows = rows;
    }

    pub fn set_treatment_counts(&mut self, treated: usize, control: usize) {
        self.treated = treated;
        self.control = control;
    }

    pub fn set_encoded_width(&mut self, cols: usize) {
        self.encoded_cols = cols;
    }

    pub fn set_partitions(&mut self, train: usize, valid: usize, test: usize) {
        self.train_rows = train;
        self.valid_rows = valid;
        self.test_rows = test;
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PREPARATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Raw Rows"),
            Cell::new(format!("{} × {} cols", self.raw_rows, self.raw_cols)),
        ]);

        table.add_row(vec![
            Cell::new("🔎 Eligible Rows"),
            Cell::new(self.eligible_rows).fg(if self.eligible_rows == 0 {
                Color::Red
            } else {
                Color::White
            }),
        ]);

        table.add_row(vec![
            Cell::new("💊 Treated / Control"),
            Cell::new(format!("{} / {}", self.treated, self.control)),
        ]);

        table.add_row(vec![
            Cell::new("🧩 Encoded Columns"),
            Cell::new(self.encoded_cols),
        ]);

        table.add_row(vec![
            Cell::new("✅ Train / Valid / Test"),
            Cell::new(format!(
                "{} / {} / {}",
                self.train_rows, self.valid_rows, self.test_rows
            ))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        ]);

        let retention_pct = if self.raw_rows > 0 {
            (self.eligible_rows as f64 / self.raw_rows as f64) * 100.0
        } else {
            0.0
        };

        let color = if retention_pct > 50.0 {
            Color::Green
        } else if retention_pct > 10.0 {
            Color::Yellow
        } else {
            Color::Cyan
        };

        table.add_row(vec![
            Cell::new("📉 Eligibility Retention"),
            Cell::new(format!("{:.1}%", retention_pct))
                .fg(color)
                .add_attribute(Attribute::Bold),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}
