//! Series alignment and distance computation
//!
//! A planet series and the reference series are paired sample by sample
//! before distances are taken. Pairing is explicit: either a join on the Day
//! value or a strict row-by-row match. Both fail instead of silently
//! truncating when the two sides disagree.

use crate::config::Alignment;
use crate::types::{BodySeries, DistanceSeries, ReportError, Result, Sample};
use std::collections::HashMap;

/// One planet sample together with the reference sample for the same day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedPair<'a> {
    pub day: f64,
    pub planet: &'a Sample,
    pub reference: &'a Sample,
}

/// Hashable form of a Day value; `-0.0` and `0.0` are the same day
fn day_key(day: f64, body: &str) -> Result<u64> {
    if !day.is_finite() {
        return Err(ReportError::InvalidDay {
            body: body.to_string(),
        });
    }
    let normalized = if day == 0.0 { 0.0 } else { day };
    Ok(normalized.to_bits())
}

/// Index a series by day, rejecting duplicates
fn index_by_day(series: &BodySeries) -> Result<HashMap<u64, &Sample>> {
    let mut index = HashMap::with_capacity(series.len());
    for sample in &series.samples {
        let key = day_key(sample.day, &series.name)?;
        if index.insert(key, sample).is_some() {
            return Err(ReportError::DuplicateDay {
                body: series.name.clone(),
                day: sample.day,
            });
        }
    }
    Ok(index)
}

/// Pair `planet` with `reference` on the Day value
///
/// Every day must occur exactly once in each series and both series must
/// cover the same set of days. Pairs come out in the planet's row order.
pub fn join_on_day<'a>(
    planet: &'a BodySeries,
    reference: &'a BodySeries,
) -> Result<Vec<AlignedPair<'a>>> {
    let reference_index = index_by_day(reference)?;
    let planet_index = index_by_day(planet)?;

    let mut pairs = Vec::with_capacity(planet.len());
    for sample in &planet.samples {
        let key = day_key(sample.day, &planet.name)?;
        let matched = reference_index
            .get(&key)
            .copied()
            .ok_or_else(|| ReportError::MissingDay {
                body: planet.name.clone(),
                other: reference.name.clone(),
                day: sample.day,
            })?;
        pairs.push(AlignedPair {
            day: sample.day,
            planet: sample,
            reference: matched,
        });
    }

    if let Some(extra) = reference.samples.iter().find(|s| {
        day_key(s.day, &reference.name)
            .map(|key| !planet_index.contains_key(&key))
            .unwrap_or(false)
    }) {
        return Err(ReportError::MissingDay {
            body: reference.name.clone(),
            other: planet.name.clone(),
            day: extra.day,
        });
    }

    Ok(pairs)
}

/// Pair `planet` with `reference` by row position
///
/// Both series must have the same length. The planet's Day is reported for
/// each pair.
pub fn zip_by_row<'a>(
    planet: &'a BodySeries,
    reference: &'a BodySeries,
) -> Result<Vec<AlignedPair<'a>>> {
    if planet.len() != reference.len() {
        return Err(ReportError::LengthMismatch {
            body: planet.name.clone(),
            reference: reference.name.clone(),
            expected: reference.len(),
            actual: planet.len(),
        });
    }

    Ok(planet
        .samples
        .iter()
        .zip(reference.samples.iter())
        .map(|(p, r)| AlignedPair {
            day: p.day,
            planet: p,
            reference: r,
        })
        .collect())
}

/// Pair two series according to `alignment`
pub fn align<'a>(
    planet: &'a BodySeries,
    reference: &'a BodySeries,
    alignment: Alignment,
) -> Result<Vec<AlignedPair<'a>>> {
    if reference.is_empty() {
        return Err(ReportError::MissingReference(reference.name.clone()));
    }
    match alignment {
        Alignment::Day => join_on_day(planet, reference),
        Alignment::Row => zip_by_row(planet, reference),
    }
}

/// Euclidean distance from `planet` to `reference` for every aligned day
pub fn distance_series(
    planet: &BodySeries,
    reference: &BodySeries,
    alignment: Alignment,
) -> Result<DistanceSeries> {
    let pairs = align(planet, reference, alignment)?;

    let (days, distances) = pairs
        .iter()
        .map(|pair| {
            let d = pair.planet.position().distance_to(&pair.reference.position());
            (pair.day, d)
        })
        .unzip();

    Ok(DistanceSeries {
        body: planet.name.clone(),
        days,
        distances,
    })
}

/// Reference XY positions aligned to the planet, for orbit charts
pub fn aligned_reference_xy(
    planet: &BodySeries,
    reference: &BodySeries,
    alignment: Alignment,
) -> Result<Vec<(f64, f64)>> {
    Ok(align(planet, reference, alignment)?
        .iter()
        .map(|pair| pair.reference.xy())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector3;
    use assert_approx_eq::assert_approx_eq;

    fn series(name: &str, rows: &[(f64, [f64; 3])]) -> BodySeries {
        BodySeries::new(
            name,
            rows.iter()
                .map(|(day, p)| Sample::new(name, *day, Vector3::new(p[0], p[1], p[2])))
                .collect(),
        )
    }

    fn sun() -> BodySeries {
        series("Sun", &[(0.0, [0.0; 3]), (1.0, [0.0; 3]), (2.0, [0.0; 3])])
    }

    fn earth() -> BodySeries {
        series(
            "Earth",
            &[
                (0.0, [1.0, 0.0, 0.0]),
                (1.0, [0.0, 1.0, 0.0]),
                (2.0, [-1.0, 0.0, 0.0]),
            ],
        )
    }

    #[test]
    fn test_unit_circle_distances() {
        let result = distance_series(&earth(), &sun(), Alignment::Day).unwrap();
        assert_eq!(result.body, "Earth");
        assert_eq!(result.days, vec![0.0, 1.0, 2.0]);
        for d in &result.distances {
            assert_approx_eq!(*d, 1.0);
        }
    }

    #[test]
    fn test_same_rows_give_zero_distance() {
        let body = earth();
        for alignment in [Alignment::Day, Alignment::Row] {
            let result = distance_series(&body, &body, alignment).unwrap();
            assert!(result.distances.iter().all(|d| *d == 0.0));
        }
    }

    #[test]
    fn test_distances_non_negative_and_symmetric() {
        let a = series("A", &[(0.0, [3.0, -4.0, 12.0]), (1.0, [-7.5, 2.0, 0.5])]);
        let b = series("B", &[(0.0, [0.0, 0.0, 0.0]), (1.0, [1.0, 1.0, 1.0])]);
        let ab = distance_series(&a, &b, Alignment::Day).unwrap();
        let ba = distance_series(&b, &a, Alignment::Day).unwrap();
        assert_approx_eq!(ab.distances[0], 13.0);
        for (x, y) in ab.distances.iter().zip(ba.distances.iter()) {
            assert!(*x >= 0.0);
            assert_approx_eq!(*x, *y);
        }
    }

    #[test]
    fn test_day_join_ignores_row_order() {
        let shuffled_sun = series(
            "Sun",
            &[(2.0, [0.0; 3]), (0.0, [1.0, 0.0, 0.0]), (1.0, [0.0; 3])],
        );
        let result = distance_series(&earth(), &shuffled_sun, Alignment::Day).unwrap();
        // Day 0: Earth (1,0,0) vs Sun (1,0,0)
        assert_approx_eq!(result.distances[0], 0.0);
        assert_approx_eq!(result.distances[1], 1.0);
        assert_approx_eq!(result.distances[2], 1.0);
    }

    #[test]
    fn test_empty_reference_fails_explicitly() {
        let empty = BodySeries::new("Sun", vec![]);
        for alignment in [Alignment::Day, Alignment::Row] {
            let err = distance_series(&earth(), &empty, alignment).unwrap_err();
            assert!(matches!(err, ReportError::MissingReference(ref name) if name == "Sun"));
        }
    }

    #[test]
    fn test_planet_day_missing_from_reference() {
        let short_sun = series("Sun", &[(0.0, [0.0; 3]), (1.0, [0.0; 3])]);
        let err = distance_series(&earth(), &short_sun, Alignment::Day).unwrap_err();
        match err {
            ReportError::MissingDay { body, other, day } => {
                assert_eq!(body, "Earth");
                assert_eq!(other, "Sun");
                assert_eq!(day, 2.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reference_day_missing_from_planet() {
        let long_sun = series(
            "Sun",
            &[(0.0, [0.0; 3]), (1.0, [0.0; 3]), (2.0, [0.0; 3]), (3.0, [0.0; 3])],
        );
        let err = distance_series(&earth(), &long_sun, Alignment::Day).unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingDay { ref body, day, .. } if body == "Sun" && day == 3.0
        ));
    }

    #[test]
    fn test_duplicate_day_rejected() {
        let doubled = series("Earth", &[(0.0, [1.0, 0.0, 0.0]), (0.0, [2.0, 0.0, 0.0])]);
        let err = distance_series(&doubled, &sun(), Alignment::Day).unwrap_err();
        assert!(matches!(err, ReportError::DuplicateDay { ref body, .. } if body == "Earth"));
    }

    #[test]
    fn test_non_finite_day_rejected() {
        let bad = series("Earth", &[(f64::NAN, [1.0, 0.0, 0.0])]);
        let err = distance_series(&bad, &sun(), Alignment::Day).unwrap_err();
        assert!(matches!(err, ReportError::InvalidDay { .. }));
    }

    #[test]
    fn test_negative_zero_day_matches_zero() {
        let planet = series("Earth", &[(-0.0, [2.0, 0.0, 0.0])]);
        let reference = series("Sun", &[(0.0, [0.0; 3])]);
        let result = distance_series(&planet, &reference, Alignment::Day).unwrap();
        assert_approx_eq!(result.distances[0], 2.0);
    }

    #[test]
    fn test_row_alignment_requires_equal_length() {
        let short_sun = series("Sun", &[(0.0, [0.0; 3])]);
        let err = distance_series(&earth(), &short_sun, Alignment::Row).unwrap_err();
        assert!(matches!(
            err,
            ReportError::LengthMismatch { expected: 1, actual: 3, .. }
        ));
    }

    #[test]
    fn test_row_alignment_pairs_by_position() {
        let offset_sun = series("Sun", &[(10.0, [0.0; 3]), (11.0, [0.0; 3]), (12.0, [0.0; 3])]);
        let result = distance_series(&earth(), &offset_sun, Alignment::Row).unwrap();
        assert_eq!(result.days, vec![0.0, 1.0, 2.0]);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_aligned_reference_xy() {
        let moving_sun = series(
            "Sun",
            &[(0.0, [0.0, 0.0, 0.0]), (1.0, [1.0, 1.0, 0.0]), (2.0, [2.0, 2.0, 0.0])],
        );
        let xy = aligned_reference_xy(&earth(), &moving_sun, Alignment::Day).unwrap();
        assert_eq!(xy, vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
    }
}
