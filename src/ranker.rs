use crate::models::{MoverDirection, MoverList, Movers, PriceRow, PriceTable};
use tracing::debug;

/// Ranks the products with the largest price decreases and increases.
///
/// Rows without a variation are not movers and are left out. The remaining
/// rows are stably sorted ascending by variation, so ties keep table order:
/// - decreases are the first `count` rows;
/// - increases are the last `count` rows, reversed so the largest comes first.
///
/// Lists are shorter than `count` (possibly empty) when there are not enough
/// rows; nothing is padded. On small tables the two lists can share rows.
pub fn rank_movers(table: &PriceTable, count: usize) -> Movers {
    let mut ranked: Vec<&PriceRow> = table
        .rows
        .iter()
        .filter(|row| row.variation_percent.is_some())
        .collect();

    ranked.sort_by(|a, b| {
        let a = a.variation_percent.unwrap_or(f64::INFINITY);
        let b = b.variation_percent.unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });

    let take = count.min(ranked.len());
    let decreases = ranked[..take].iter().map(|row| (*row).clone()).collect();
    let increases = ranked[ranked.len() - take..]
        .iter()
        .rev()
        .map(|row| (*row).clone())
        .collect();

    debug!(
        candidates = ranked.len(),
        listed = take,
        "Movers ranked"
    );

    Movers {
        decreases: MoverList {
            direction: MoverDirection::Decrease,
            rows: decreases,
        },
        increases: MoverList {
            direction: MoverDirection::Increase,
            rows: increases,
        },
    }
}
