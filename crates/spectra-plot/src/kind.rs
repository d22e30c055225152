//! Conversions from complex samples to plotted quantities.

use std::f64::consts::PI;
use std::str::FromStr;

use num_complex::Complex64;

use crate::error::PlotError;

/// A real quantity derived from a complex sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlotKind {
    /// Real part.
    Real,
    /// Imaginary part.
    Imag,
    /// Modulus.
    Magnitude,
    /// Argument in radians.
    PhaseRadians,
    /// Argument in degrees.
    PhaseDegrees,
    /// `20·log10` of the modulus.
    Decibels,
}

impl PlotKind {
    /// Converts one sample.
    #[must_use]
    pub fn apply(self, z: Complex64) -> f64 {
        match self {
            PlotKind::Real => z.re,
            PlotKind::Imag => z.im,
            PlotKind::Magnitude => z.norm(),
            PlotKind::PhaseRadians => z.arg(),
            PlotKind::PhaseDegrees => z.arg() * 180.0 / PI,
            PlotKind::Decibels => 20.0 * z.norm().log10(),
        }
    }

    /// The descriptive part of an axis label, e.g. `"phase"`.
    #[must_use]
    pub fn part(self) -> &'static str {
        match self {
            PlotKind::Real => "real part",
            PlotKind::Imag => "imag part",
            PlotKind::Magnitude | PlotKind::Decibels => "magnitude",
            PlotKind::PhaseRadians | PlotKind::PhaseDegrees => "phase",
        }
    }

    /// Units implied by the conversion, if any.
    #[must_use]
    pub fn units(self) -> Option<&'static str> {
        match self {
            PlotKind::Decibels => Some("dB"),
            PlotKind::PhaseRadians => Some("radians"),
            PlotKind::PhaseDegrees => Some("degrees"),
            _ => None,
        }
    }

    /// Returns true if the quantity is meaningless for real data.
    #[must_use]
    pub fn needs_complex(self) -> bool {
        matches!(
            self,
            PlotKind::Imag | PlotKind::PhaseRadians | PlotKind::PhaseDegrees
        )
    }

    /// Returns true if the quantity is never negative.
    #[must_use]
    pub fn is_magnitude(self) -> bool {
        self == PlotKind::Magnitude
    }
}

/// One or two quantities drawn against a shared abscissa.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlotLayout {
    /// Quantity on the left axis.
    pub primary: PlotKind,
    /// Quantity on a secondary right axis.
    pub secondary: Option<PlotKind>,
}

impl PlotLayout {
    /// A single quantity.
    #[must_use]
    pub fn single(kind: PlotKind) -> Self {
        PlotLayout {
            primary: kind,
            secondary: None,
        }
    }

    /// A quantity with a second one on the right axis.
    #[must_use]
    pub fn dual(primary: PlotKind, secondary: PlotKind) -> Self {
        PlotLayout {
            primary,
            secondary: Some(secondary),
        }
    }

    /// Picks a layout for data that is or is not complex.
    ///
    /// Without a plot type, complex data gets `dB-phase` and real data its
    /// value.
    ///
    /// # Errors
    ///
    /// [`PlotError::UnknownPlotType`] for an unrecognized name and
    /// [`PlotError::NotComplex`] for a complex-only layout on real data.
    pub fn for_data(plot_type: Option<&str>, is_complex: bool) -> Result<Self, PlotError> {
        let Some(name) = plot_type else {
            return Ok(if is_complex {
                PlotLayout::dual(PlotKind::Decibels, PlotKind::PhaseRadians)
            } else {
                PlotLayout::single(PlotKind::Real)
            });
        };
        let layout: PlotLayout = name.parse()?;
        if !is_complex && (layout.secondary.is_some() || layout.primary.needs_complex()) {
            return Err(PlotError::NotComplex(name.to_string()));
        }
        Ok(layout)
    }

    /// The quantities in drawing order.
    pub fn kinds(&self) -> impl Iterator<Item = PlotKind> {
        std::iter::once(self.primary).chain(self.secondary)
    }
}

impl FromStr for PlotLayout {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use PlotKind::{Decibels, Imag, Magnitude, PhaseDegrees, PhaseRadians, Real};

        let normalized = s.replace('_', "-");
        let layout = match normalized.as_str() {
            "dB-phase" | "dB-radians" => PlotLayout::dual(Decibels, PhaseRadians),
            "dB-phase-degrees" | "dB-degrees" => PlotLayout::dual(Decibels, PhaseDegrees),
            "mag-phase" | "magnitude-phase" => PlotLayout::dual(Magnitude, PhaseRadians),
            "mag-phase-degrees" | "magnitude-phase-degrees" => {
                PlotLayout::dual(Magnitude, PhaseDegrees)
            }
            "real-imag" => PlotLayout::dual(Real, Imag),
            "mag" | "magnitude" | "abs" => PlotLayout::single(Magnitude),
            "phase" | "radians" => PlotLayout::single(PhaseRadians),
            "phase-degrees" | "degrees" => PlotLayout::single(PhaseDegrees),
            "real" => PlotLayout::single(Real),
            "imag" => PlotLayout::single(Imag),
            "dB" => PlotLayout::single(Decibels),
            _ => return Err(PlotError::UnknownPlotType(s.to_string())),
        };
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kind_conversions() {
        let z = Complex64::new(0.0, 10.0);
        assert_relative_eq!(PlotKind::Real.apply(z), 0.0);
        assert_relative_eq!(PlotKind::Imag.apply(z), 10.0);
        assert_relative_eq!(PlotKind::Magnitude.apply(z), 10.0);
        assert_relative_eq!(PlotKind::Decibels.apply(z), 20.0, epsilon = 1e-12);
        assert_relative_eq!(PlotKind::PhaseRadians.apply(z), PI / 2.0);
        assert_relative_eq!(PlotKind::PhaseDegrees.apply(z), 90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_layouts() {
        assert_eq!(
            "dB-phase".parse::<PlotLayout>().unwrap(),
            PlotLayout::dual(PlotKind::Decibels, PlotKind::PhaseRadians)
        );
        assert_eq!(
            "mag_phase_degrees".parse::<PlotLayout>().unwrap(),
            PlotLayout::dual(PlotKind::Magnitude, PlotKind::PhaseDegrees)
        );
        assert_eq!(
            "magnitude".parse::<PlotLayout>().unwrap(),
            PlotLayout::single(PlotKind::Magnitude)
        );
        assert!(matches!(
            "sideways".parse::<PlotLayout>(),
            Err(PlotError::UnknownPlotType(_))
        ));
    }

    #[test]
    fn test_defaults_follow_data() {
        assert_eq!(
            PlotLayout::for_data(None, true).unwrap(),
            PlotLayout::dual(PlotKind::Decibels, PlotKind::PhaseRadians)
        );
        assert_eq!(
            PlotLayout::for_data(None, false).unwrap(),
            PlotLayout::single(PlotKind::Real)
        );
    }

    #[test]
    fn test_real_data_rejects_phase() {
        assert_eq!(
            PlotLayout::for_data(Some("mag-phase"), false),
            Err(PlotError::NotComplex("mag-phase".to_string()))
        );
        assert!(PlotLayout::for_data(Some("phase"), false).is_err());
        assert!(PlotLayout::for_data(Some("dB"), false).is_ok());
    }
}
