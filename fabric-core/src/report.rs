//! Plain-text rendering of a design estimate.

use std::fmt;

use crate::model::MaterialBenchmarkResult;
use crate::DesignEstimate;

/// Text report of a [`DesignEstimate`], rendered through `Display`.
pub struct TextReport<'a> {
    estimate: &'a DesignEstimate,
}

impl<'a> TextReport<'a> {
    /// Wrap an estimate for rendering.
    pub fn new(estimate: &'a DesignEstimate) -> Self {
        Self { estimate }
    }

    fn write_materials(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.estimate;
        writeln!(f, "[MATERIALS]")?;
        if e.aggregation.groups.is_empty() {
            writeln!(f, "(none)")?;
        }
        for group in &e.aggregation.groups {
            let cost = e.pricing.cost_of(group.material_id);
            let members: Vec<&str> = group.member_names().collect();
            writeln!(
                f,
                "{} {}: area={:.1} cm2 length={:.1} m",
                group.material_id, group.material_name, group.total_area_cm2, group.required_length_m
            )?;
            match cost {
                Some(c) if !c.price_missing => {
                    writeln!(f, "  price={:.0}/m cost={:.0}", c.unit_price, c.cost)?
                }
                _ => writeln!(f, "  price=missing cost=0")?,
            }
            writeln!(f, "  pieces: {}", members.join(", "))?;
        }
        writeln!(f)
    }

    fn write_incomplete(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let incomplete = &self.estimate.aggregation.incomplete;
        if incomplete.is_empty() {
            return Ok(());
        }
        writeln!(f, "[INCOMPLETE]")?;
        for piece in incomplete {
            writeln!(f, "{} {}: {}", piece.piece.id, piece.piece.name, piece.reason)?;
        }
        writeln!(f)
    }

    fn write_totals(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.estimate.pricing;
        writeln!(f, "[TOTALS]")?;
        writeln!(f, "length_per_garment={:.1} m", p.total_length_m)?;
        writeln!(f, "cost_per_garment={:.0}", p.total_per_garment)?;
        writeln!(f, "garments={}", p.garment_quantity)?;
        writeln!(f, "cost_batch={:.0}", p.total_batch)?;
        writeln!(f)
    }

    fn write_sustainability(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.estimate;
        let d = &e.display;
        writeln!(f, "[SUSTAINABILITY]")?;
        writeln!(f, "recycled={}%", d.recycled_percentage)?;
        writeln!(f, "score={}%", d.sustainability_score)?;
        writeln!(f, "carbon={} {}", d.carbon, e.score.carbon.unit_label())?;
        writeln!(f, "water={} {}", d.water, e.score.water.unit_label())?;
        writeln!(f, "waste_diverted={} {}", d.waste, e.score.waste.unit_label())?;
        for share in &e.usage_shares {
            writeln!(f, "share {}={}%", share.material_name, share.display_percentage())?;
        }
        writeln!(f)
    }

    fn write_benchmarks(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in &self.estimate.benchmarks {
            if table.results.is_empty() {
                continue;
            }
            writeln!(f, "[BENCHMARK {}]", table.material_name)?;
            for row in &table.results {
                writeln!(f, "{}", BenchmarkRow(row))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; Design: {}", self.estimate.design_name)?;
        writeln!(f)?;
        self.write_materials(f)?;
        self.write_incomplete(f)?;
        self.write_totals(f)?;
        self.write_sustainability(f)?;
        self.write_benchmarks(f)
    }
}

/// One benchmark line: name, target, actual and outcome.
struct BenchmarkRow<'a>(&'a MaterialBenchmarkResult);

impl fmt::Display for BenchmarkRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = self.0;
        write!(f, "{}: target={} {}", row.criterion_name, row.target_value, row.unit)?;
        match row.actual_value {
            Some(actual) => write!(f, " actual={} {}", actual, row.unit)?,
            None => write!(f, " actual=-")?,
        }
        match (row.improvement_percentage, row.classification) {
            (Some(pct), Some(class)) => write!(f, " {:+.1}% {}", pct, class),
            _ => write!(f, " no data"),
        }
    }
}
