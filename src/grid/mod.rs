//! Search-box geometry for docking runs

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Padding added to every axis of the search box, in Angstroms.
pub const DEFAULT_PADDING: f64 = 5.0;

/// Errors that can occur when deriving a search box
#[derive(Error, Debug)]
pub enum BoxError {
    #[error("cannot derive a search box from an empty coordinate set")]
    EmptyInput,
}

/// Axis-aligned cuboid defining the docking search region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchBox {
    /// Geometric center of the box in Angstroms
    pub center: Vector3<f64>,

    /// Edge lengths of the box in Angstroms
    pub size: Vector3<f64>,
}

impl SearchBox {
    /// Derive the box enclosing `coordinates` with `padding` added to every axis.
    ///
    /// `center` is the per-axis midpoint of the extremes and `size` is the
    /// per-axis range plus the flat padding term. For a single point the size
    /// equals the padding on every axis.
    pub fn padded_enclosing(
        coordinates: &[Vector3<f64>],
        padding: f64,
    ) -> Result<Self, BoxError> {
        let (min, max) = extremes(coordinates)?;

        Ok(Self {
            center: (min + max) / 2.0,
            size: (max - min).add_scalar(padding),
        })
    }

    /// Derive the box that exactly encloses `coordinates`, with no padding.
    ///
    /// Kept separate from [`SearchBox::padded_enclosing`]: the standalone box
    /// calculator reports the raw extent of a structure, while docking runs
    /// pad the search region.
    pub fn tight_enclosing(coordinates: &[Vector3<f64>]) -> Result<Self, BoxError> {
        Self::padded_enclosing(coordinates, 0.0)
    }
}

/// Per-axis minimum and maximum across all points.
fn extremes(coordinates: &[Vector3<f64>]) -> Result<(Vector3<f64>, Vector3<f64>), BoxError> {
    if coordinates.is_empty() {
        return Err(BoxError::EmptyInput);
    }

    let mut min = Vector3::new(f64::MAX, f64::MAX, f64::MAX);
    let mut max = Vector3::new(f64::MIN, f64::MIN, f64::MIN);

    for position in coordinates {
        min.x = min.x.min(position.x);
        min.y = min.y.min(position.y);
        min.z = min.z.min(position.z);

        max.x = max.x.max(position.x);
        max.y = max.y.max(position.y);
        max.z = max.z.max(position.z);
    }

    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn center_is_midpoint_and_size_is_padded_range() {
        let coordinates = vec![
            Vector3::new(-2.0, 0.0, 10.0),
            Vector3::new(4.0, 6.0, 12.0),
            Vector3::new(1.0, 3.0, 11.0),
        ];

        let bbox = SearchBox::padded_enclosing(&coordinates, DEFAULT_PADDING).unwrap();

        assert_approx_eq!(bbox.center.x, 1.0);
        assert_approx_eq!(bbox.center.y, 3.0);
        assert_approx_eq!(bbox.center.z, 11.0);
        assert_approx_eq!(bbox.size.x, 6.0 + DEFAULT_PADDING);
        assert_approx_eq!(bbox.size.y, 6.0 + DEFAULT_PADDING);
        assert_approx_eq!(bbox.size.z, 2.0 + DEFAULT_PADDING);
    }

    #[test]
    fn single_point_box_is_all_padding() {
        let coordinates = vec![Vector3::new(3.5, -1.25, 8.0)];

        let bbox = SearchBox::padded_enclosing(&coordinates, DEFAULT_PADDING).unwrap();

        assert_approx_eq!(bbox.center.x, 3.5);
        assert_approx_eq!(bbox.center.y, -1.25);
        assert_approx_eq!(bbox.center.z, 8.0);
        assert_approx_eq!(bbox.size.x, DEFAULT_PADDING);
        assert_approx_eq!(bbox.size.y, DEFAULT_PADDING);
        assert_approx_eq!(bbox.size.z, DEFAULT_PADDING);
    }

    #[test]
    fn tight_box_has_no_padding() {
        let coordinates = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 4.0, 8.0)];

        let bbox = SearchBox::tight_enclosing(&coordinates).unwrap();

        assert_approx_eq!(bbox.size.x, 2.0);
        assert_approx_eq!(bbox.size.y, 4.0);
        assert_approx_eq!(bbox.size.z, 8.0);
        assert_approx_eq!(bbox.center.x, 1.0);
    }

    #[test]
    fn empty_coordinate_set_is_an_error() {
        let result = SearchBox::padded_enclosing(&[], DEFAULT_PADDING);
        assert!(matches!(result, Err(BoxError::EmptyInput)));

        let result = SearchBox::tight_enclosing(&[]);
        assert!(matches!(result, Err(BoxError::EmptyInput)));
    }
}
