//! Settings for painting scores onto a hemisphere: which hemisphere, which score columns, and how to render them.

use std::fmt;
use std::str::FromStr;


/// A brain hemisphere. Each hemisphere has its own mesh and parcellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    Left,
    Right,
}

impl Hemisphere {
    /// The FreeSurfer file name prefix for the hemisphere, `lh` or `rh`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Hemisphere::Left => "lh",
            Hemisphere::Right => "rh",
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Hemisphere::Left => write!(f, "left"),
            Hemisphere::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Hemisphere {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "lh" => Ok(Hemisphere::Left),
            "right" | "rh" => Ok(Hemisphere::Right),
            _ => Err(format!("Invalid hemisphere '{}', expected 'left' or 'right'.", s)),
        }
    }
}


/// The camera angle a surface is rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Lateral,
    Medial,
    Dorsal,
    Ventral,
    Anterior,
    Posterior,
}

impl View {
    pub const ALL: [View; 6] = [View::Lateral, View::Medial, View::Dorsal, View::Ventral, View::Anterior, View::Posterior];

    pub fn name(&self) -> &'static str {
        match self {
            View::Lateral => "lateral",
            View::Medial => "medial",
            View::Dorsal => "dorsal",
            View::Ventral => "ventral",
            View::Anterior => "anterior",
            View::Posterior => "posterior",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        View::ALL.iter()
            .find(|v| v.name() == lower)
            .copied()
            .ok_or_else(|| format!("Invalid view '{}', expected one of lateral, medial, dorsal, ventral, anterior, posterior.", s))
    }
}


/// Resolution of the standard template mesh. `Low` is fast to render, `High` is prettier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshResolution {
    Low,
    High,
}

impl FromStr for MeshResolution {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" | "fsaverage5" => Ok(MeshResolution::Low),
            "high" | "fsaverage" | "fsaverage7" => Ok(MeshResolution::High),
            _ => Err(format!("Invalid mesh resolution '{}', expected 'low' or 'high'.", s)),
        }
    }
}


/// Options for [`crate::cortical_plot`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub hemisphere: Hemisphere,
    /// Restrict plotting to these score columns. `None` or an empty list means all score columns.
    pub columns: Option<Vec<String>>,
    pub view: View,
    pub colormap: String,
    /// Template mesh resolution. The atlas provider must supply a parcellation with the same vertex count, which [`crate::FsAverageAtlas`] does unless a fixed parcellation subject is configured.
    pub resolution: MeshResolution,
}

impl Default for PlotOptions {
    fn default() -> PlotOptions {
        PlotOptions {
            hemisphere: Hemisphere::Left,
            columns: None,
            view: View::Lateral,
            colormap: String::from("gist_ncar"),
            resolution: MeshResolution::Low,
        }
    }
}
