//! Rune drop breakdowns and histograms.
//!
//! Grouped breakdowns run in SQL. Substats are stored as JSON arrays and are
//! flattened client-side, as are both histograms.

use crate::database::QueryHelper;
use crate::errors::AppResult;
use crate::reports::categories::DropQuery;
use crate::reports::histogram::{build_histogram, HistogramSpec};
use crate::types::choices::optional_stat_label;
use crate::types::report::{LabelCount, Occurrences, RuneDropReport, SlotCount};
use crate::types::{CategoryReport, RuneQuality, RuneStat, RuneType};
use std::collections::{BTreeMap, BTreeSet};

pub const EFFICIENCY_BUCKET_WIDTH: i64 = 5;
pub const EFFICIENCY_RANGE: (i64, i64) = (0, 100);
pub const VALUE_BUCKET_WIDTH: i64 = 500;
pub const VALUE_ROUNDING: i64 = 1000;

/// `(code, count)` pairs for one grouped column
fn grouped_counts(query: &DropQuery<'_>, column: &str, order: &str) -> AppResult<Vec<(Option<i64>, usize)>> {
    query.conn().query_collect(
        &query.select(
            &format!("{}, COUNT(*)", column),
            "",
            &format!("GROUP BY {} ORDER BY {}", column, order),
        ),
        |row| Ok((row.get::<_, Option<i64>>(0)?, row.get::<_, i64>(1)? as usize)),
    )
}

fn labelled<F>(rows: Vec<(Option<i64>, usize)>, label: F) -> Vec<LabelCount>
where
    F: Fn(Option<i64>) -> String,
{
    rows.into_iter()
        .map(|(code, count)| LabelCount::new(label(code), count))
        .collect()
}

fn stars_label(stars: Option<i64>) -> String {
    format!("{}⭐", stars.unwrap_or_default())
}

struct RuneSample {
    quality: i64,
    value: i64,
    max_efficiency: f64,
    substats: Vec<i64>,
}

pub fn aggregate(query: &DropQuery<'_>, _log_count: usize) -> AppResult<Option<CategoryReport>> {
    let total = query.count()?;
    if total == 0 {
        return Ok(None);
    }

    let by_count = |column: &str| format!("COUNT(*) DESC, {}", column);

    let stars = grouped_counts(query, "d.stars", &by_count("d.stars"))?;
    let rune_type = grouped_counts(query, "d.rune_type", &by_count("d.rune_type"))?;
    let quality = grouped_counts(query, "d.quality", &by_count("d.quality"))?;
    let slot = grouped_counts(query, "d.slot", &by_count("d.slot"))?;
    let main_stat = grouped_counts(query, "d.main_stat", "d.main_stat")?;
    let innate_stat = grouped_counts(query, "d.innate_stat", "d.innate_stat")?;

    let raw_samples = query.conn().query_collect(
        &query.select("d.quality, d.value, d.max_efficiency, d.substats", "", "ORDER BY d.id"),
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, String>(3)?,
            ))
        },
    )?;
    let samples = raw_samples
        .into_iter()
        .map(|(quality, value, max_efficiency, substats)| {
            Ok(RuneSample {
                quality,
                value,
                max_efficiency,
                substats: serde_json::from_str(&substats)?,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    // Substat population is every listed substat, not the rune count
    let mut substat_counts: BTreeMap<i64, usize> = BTreeMap::new();
    for substat in samples.iter().flat_map(|rune| rune.substats.iter()) {
        *substat_counts.entry(*substat).or_insert(0) += 1;
    }
    let substat_total: usize = substat_counts.values().sum();
    let substats = substat_counts
        .into_iter()
        .map(|(code, count)| LabelCount::new(RuneStat::label_for(code), count))
        .collect();

    // Histograms are sliced by the qualities present, in quality order
    let qualities: BTreeSet<i64> = samples.iter().map(|rune| rune.quality).collect();
    let slices: Vec<String> = qualities.iter().map(|q| RuneQuality::label_for(*q)).collect();

    let efficiency_samples: Vec<(f64, String)> = samples
        .iter()
        .map(|rune| (rune.max_efficiency, RuneQuality::label_for(rune.quality)))
        .collect();
    let efficiency_spec = HistogramSpec::new(
        EFFICIENCY_RANGE.0,
        EFFICIENCY_RANGE.1,
        EFFICIENCY_BUCKET_WIDTH,
    );

    let min_value = samples.iter().map(|rune| rune.value).min().unwrap_or_default();
    let max_value = samples.iter().map(|rune| rune.value).max().unwrap_or_default();
    let value_samples: Vec<(f64, String)> = samples
        .iter()
        .map(|rune| (rune.value as f64, RuneQuality::label_for(rune.quality)))
        .collect();
    let value_spec = HistogramSpec::covering(min_value, max_value, VALUE_ROUNDING, VALUE_BUCKET_WIDTH);

    Ok(Some(CategoryReport::Runes(Box::new(RuneDropReport {
        stars: Occurrences::new(total, labelled(stars, stars_label)),
        rune_type: Occurrences::new(
            total,
            labelled(rune_type, |code| RuneType::label_for(code.unwrap_or_default())),
        ),
        quality: Occurrences::new(
            total,
            labelled(quality, |code| RuneQuality::label_for(code.unwrap_or_default())),
        ),
        slot: Occurrences::new(
            total,
            slot.into_iter()
                .map(|(slot, count)| SlotCount {
                    slot: slot.unwrap_or_default(),
                    count,
                })
                .collect(),
        ),
        main_stat: Occurrences::new(
            total,
            labelled(main_stat, |code| RuneStat::label_for(code.unwrap_or_default())),
        ),
        innate_stat: Occurrences::new(total, labelled(innate_stat, optional_stat_label)),
        substats: Occurrences::new(substat_total, substats),
        max_efficiency: build_histogram(&efficiency_spec, &efficiency_samples, &slices),
        value: build_histogram(&value_spec, &value_samples, &slices),
    }))))
}
