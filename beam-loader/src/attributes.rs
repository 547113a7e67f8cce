//! Positional beam attribute row

use log::warn;
use serde::{Deserialize, Serialize};

use crate::coerce::Field;
use crate::error::{LoaderError, LoaderResult};
use crate::reader::RawRow;

/// Attribute names in their positional order
pub const ATTRIBUTE_ORDER: [&str; 8] = ["L", "E", "Iz", "Iy", "A", "J", "nu", "rho"];

/// `L`, `E` and `Iz` must always be given
pub const REQUIRED_ATTRIBUTES: usize = 3;

/// Geometric and material properties of a beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamAttributes {
    #[serde(rename = "L")]
    pub length: f64,
    #[serde(rename = "E")]
    pub e: f64,
    #[serde(rename = "Iz")]
    pub iz: f64,
    #[serde(rename = "Iy")]
    pub iy: f64,
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "J")]
    pub j: f64,
    pub nu: f64,
    pub rho: f64,
}

impl BeamAttributes {
    /// Map positional values onto attributes, filling omitted trailing
    /// attributes with `default`.
    pub fn from_values(values: &[f64], default: f64) -> LoaderResult<Self> {
        if let Some(&name) = ATTRIBUTE_ORDER[..REQUIRED_ATTRIBUTES].get(values.len()) {
            return Err(LoaderError::MissingRequiredAttribute { name });
        }
        if values.len() > ATTRIBUTE_ORDER.len() {
            warn!(
                "Ignoring {} value(s) after the {} beam attributes",
                values.len() - ATTRIBUTE_ORDER.len(),
                ATTRIBUTE_ORDER.len()
            );
        }

        let at = |i: usize| values.get(i).copied().unwrap_or(default);
        let attributes = Self {
            length: at(0),
            e: at(1),
            iz: at(2),
            iy: at(3),
            a: at(4),
            j: at(5),
            nu: at(6),
            rho: at(7),
        };

        if attributes.length <= 0.0 {
            return Err(LoaderError::InvalidAttribute {
                name: "L",
                value: attributes.length,
                reason: "beam length must be positive".to_string(),
            });
        }

        Ok(attributes)
    }

    /// Parse an attribute row; every field must be numeric
    pub fn parse_row(row: &RawRow, default: f64) -> LoaderResult<Self> {
        let values = numeric_values(row)?;
        Self::from_values(&values, default)
    }

    /// Shear modulus from `E` and `nu`
    pub fn shear_modulus(&self) -> f64 {
        fea_solver::elements::shear_modulus(self.e, self.nu)
    }
}

/// Coerce a row that must be entirely numeric
pub(crate) fn numeric_values(row: &RawRow) -> LoaderResult<Vec<f64>> {
    row.fields
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let name = ATTRIBUTE_ORDER
                .get(i)
                .map(|n| n.to_string())
                .unwrap_or_else(|| format!("field {}", i + 1));
            Field::coerce(token).require_numeric(row.line, &name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_attributes_default_to_one() {
        let attrs = BeamAttributes::from_values(
            &[20000.0, 200000.0, 6480e6, 390e6, 43900.0, 11900e3, 0.3],
            1.0,
        )
        .unwrap();

        assert_eq!(attrs.length, 20000.0);
        assert_eq!(attrs.e, 200000.0);
        assert_eq!(attrs.iz, 6480e6);
        assert_eq!(attrs.iy, 390e6);
        assert_eq!(attrs.a, 43900.0);
        assert_eq!(attrs.j, 11900e3);
        assert_eq!(attrs.nu, 0.3);
        assert_eq!(attrs.rho, 1.0);
    }

    #[test]
    fn test_required_only() {
        let attrs = BeamAttributes::from_values(&[4800.0, 19200.0, 1e9], 1.0).unwrap();
        assert_eq!(
            [attrs.iy, attrs.a, attrs.j, attrs.nu, attrs.rho],
            [1.0; 5]
        );
    }

    #[test]
    fn test_missing_required_attribute() {
        let err = BeamAttributes::from_values(&[4800.0, 19200.0], 1.0).unwrap_err();
        assert!(matches!(err, LoaderError::MissingRequiredAttribute { name: "Iz" }));

        let err = BeamAttributes::from_values(&[], 1.0).unwrap_err();
        assert!(matches!(err, LoaderError::MissingRequiredAttribute { name: "L" }));
    }

    #[test]
    fn test_non_positive_length() {
        let err = BeamAttributes::from_values(&[0.0, 1.0, 1.0], 1.0).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidAttribute { name: "L", .. }));
    }

    #[test]
    fn test_extra_values_are_ignored() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let attrs = BeamAttributes::from_values(&values, 1.0).unwrap();
        assert_eq!(attrs.rho, 8.0);
    }

    #[test]
    fn test_non_numeric_field() {
        let row = RawRow::new(2, &["4800", "steel", "1e9"]);
        let err = BeamAttributes::parse_row(&row, 1.0).unwrap_err();
        assert!(matches!(err, LoaderError::NotNumeric { line: 2, ref field, .. } if field == "E"));
    }

    #[test]
    fn test_serializes_with_input_names() {
        let attrs = BeamAttributes::from_values(&[4800.0, 19200.0, 1e9], 1.0).unwrap();
        let json = serde_json::to_value(attrs).unwrap();
        assert_eq!(json["L"], 4800.0);
        assert_eq!(json["Iz"], 1e9);
        assert_eq!(json["rho"], 1.0);
    }
}
