//! Figure descriptions handed to an external plotting frontend.
//!
//! Nothing here draws. A [`Figure`] is a set of labeled numeric sequences plus axis hints,
//! and a [`Renderer`] turns it into pixels, SVG, a JS chart, or whatever the frontend owns.

use crate::bifurcation::BifurcationDiagram;
use crate::trajectory::{Component, Trajectory};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Marker size used for bifurcation scatter plots.
pub const BIFURCATION_MARKER_SIZE: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeriesStyle {
    Line,
    Scatter { marker_size: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default)]
    pub z: Option<Vec<f64>>,
    pub style: SeriesStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(default)]
    pub z_label: Option<String>,
    pub x_range: Option<AxisRange>,
    pub y_range: Option<AxisRange>,
    #[serde(default)]
    pub z_range: Option<AxisRange>,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn is_3d(&self) -> bool {
        self.z_label.is_some()
    }
}

/// Consumer of figure descriptions.
pub trait Renderer {
    fn render(&mut self, figure: &Figure) -> Result<()>;
}

/// Display range for a component plotted against time or in phase space.
pub fn state_range(component: Component) -> AxisRange {
    match component {
        Component::X | Component::Y => AxisRange::new(-12.0, 12.0),
        Component::Z => AxisRange::new(0.0, 25.0),
    }
}

/// Display range for the maxima of a component in a bifurcation diagram.
pub fn bifurcation_range(component: Component) -> AxisRange {
    match component {
        Component::X => AxisRange::new(3.0, 12.0),
        Component::Y => AxisRange::new(-1.0, 12.0),
        Component::Z => AxisRange::new(-2.0, 27.0),
    }
}

/// One component against time, over the whole run.
pub fn time_series_figure(trajectory: &Trajectory, component: Component) -> Figure {
    let label = component.label();
    Figure {
        title: format!("{label} vs t"),
        x_label: "t".to_string(),
        y_label: label.to_string(),
        z_label: None,
        x_range: None,
        y_range: Some(state_range(component)),
        z_range: None,
        series: vec![Series {
            label: label.to_string(),
            x: trajectory.time().to_vec(),
            y: trajectory.component(component).to_vec(),
            z: None,
            style: SeriesStyle::Line,
        }],
    }
}

/// Two components against each other over the post-transient half.
pub fn phase_portrait(
    trajectory: &Trajectory,
    horizontal: Component,
    vertical: Component,
) -> Result<Figure> {
    if horizontal == vertical {
        bail!(
            "Phase portrait needs two distinct components, got {} twice.",
            horizontal.label()
        );
    }
    let (h, v) = (horizontal.label(), vertical.label());
    Ok(Figure {
        title: format!("{h} vs {v}"),
        x_label: h.to_string(),
        y_label: v.to_string(),
        z_label: None,
        x_range: Some(state_range(horizontal)),
        y_range: Some(state_range(vertical)),
        z_range: None,
        series: vec![Series {
            label: format!("{h}{v}"),
            x: trajectory.second_half(horizontal).to_vec(),
            y: trajectory.second_half(vertical).to_vec(),
            z: None,
            style: SeriesStyle::Line,
        }],
    })
}

/// The attractor in three dimensions over the post-transient half.
pub fn phase_portrait_3d(trajectory: &Trajectory) -> Figure {
    Figure {
        title: "x and y vs z".to_string(),
        x_label: "x".to_string(),
        y_label: "y".to_string(),
        z_label: Some("z".to_string()),
        x_range: Some(state_range(Component::X)),
        y_range: Some(state_range(Component::Y)),
        z_range: Some(state_range(Component::Z)),
        series: vec![Series {
            label: "xyz".to_string(),
            x: trajectory.second_half(Component::X).to_vec(),
            y: trajectory.second_half(Component::Y).to_vec(),
            z: Some(trajectory.second_half(Component::Z).to_vec()),
            style: SeriesStyle::Line,
        }],
    }
}

pub fn bifurcation_figure(diagram: &BifurcationDiagram) -> Figure {
    let (cs, values) = diagram.columns();
    Figure {
        title: "Max Value vs c".to_string(),
        x_label: "c".to_string(),
        y_label: "Max Value".to_string(),
        z_label: None,
        x_range: None,
        y_range: Some(bifurcation_range(diagram.component)),
        z_range: None,
        series: vec![Series {
            label: format!("{} maxima", diagram.component.label()),
            x: cs,
            y: values,
            z: None,
            style: SeriesStyle::Scatter {
                marker_size: BIFURCATION_MARKER_SIZE,
            },
        }],
    }
}

/// Time series for x, y, z, the x-y, y-z and x-z portraits, then the 3-D portrait.
pub fn trajectory_figures(trajectory: &Trajectory) -> Result<Vec<Figure>> {
    let mut figures: Vec<Figure> = Component::ALL
        .iter()
        .map(|&c| time_series_figure(trajectory, c))
        .collect();
    for (h, v) in [
        (Component::X, Component::Y),
        (Component::Y, Component::Z),
        (Component::X, Component::Z),
    ] {
        figures.push(phase_portrait(trajectory, h, v)?);
    }
    figures.push(phase_portrait_3d(trajectory));
    Ok(figures)
}

/// Hands every figure to `renderer`, stopping at the first failure.
pub fn render_all(renderer: &mut impl Renderer, figures: &[Figure]) -> Result<()> {
    for figure in figures {
        renderer
            .render(figure)
            .with_context(|| format!("Failed to render figure \"{}\".", figure.title))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bifurcation::{scan, SweepSettings};
    use crate::integrator::{Integrator, IntegratorSettings};
    use anyhow::anyhow;

    #[derive(Default)]
    struct Recorder {
        titles: Vec<String>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, figure: &Figure) -> Result<()> {
            self.titles.push(figure.title.clone());
            Ok(())
        }
    }

    struct Failing;

    impl Renderer for Failing {
        fn render(&mut self, _figure: &Figure) -> Result<()> {
            Err(anyhow!("device lost"))
        }
    }

    fn trajectory() -> Trajectory {
        let settings = IntegratorSettings::default()
            .with_dt(0.01)
            .with_total_time(10.0);
        Integrator::new(5.7, settings).expect("integrator").run()
    }

    #[test]
    fn time_series_figure_covers_whole_run() {
        let trajectory = trajectory();
        let figure = time_series_figure(&trajectory, Component::Z);
        assert_eq!(figure.title, "z vs t");
        assert_eq!(figure.x_label, "t");
        assert_eq!(figure.y_range, Some(AxisRange::new(0.0, 25.0)));
        assert_eq!(figure.series[0].x.len(), trajectory.len());
        assert_eq!(figure.series[0].y, trajectory.z());
    }

    #[test]
    fn phase_portraits_use_second_half_only() {
        let trajectory = trajectory();
        let figure = phase_portrait(&trajectory, Component::X, Component::Y).expect("figure");
        assert_eq!(figure.title, "x vs y");
        assert_eq!(figure.series[0].x.len(), trajectory.len() / 2 - 1);
        assert_eq!(figure.series[0].x[0], trajectory.x()[trajectory.len() / 2]);

        let cube = phase_portrait_3d(&trajectory);
        assert!(cube.is_3d());
        assert_eq!(cube.z_range, Some(AxisRange::new(0.0, 25.0)));
        assert_eq!(
            cube.series[0].z.as_ref().map(Vec::len),
            Some(trajectory.len() / 2 - 1)
        );
    }

    #[test]
    fn phase_portrait_rejects_repeated_component() {
        let trajectory = trajectory();
        let err = phase_portrait(&trajectory, Component::Y, Component::Y)
            .expect_err("same component twice");
        assert!(err.to_string().contains("two distinct components"));
    }

    #[test]
    fn bifurcation_figure_is_a_scatter_with_component_range() {
        let settings = SweepSettings {
            samples: 3,
            integrator: IntegratorSettings::default()
                .with_dt(0.05)
                .with_total_time(50.0),
            ..SweepSettings::default()
        };
        let diagram = scan(Component::Y, &settings).expect("scan");
        let figure = bifurcation_figure(&diagram);

        assert_eq!(figure.title, "Max Value vs c");
        assert_eq!(figure.y_label, "Max Value");
        assert_eq!(figure.y_range, Some(AxisRange::new(-1.0, 12.0)));
        assert_eq!(
            figure.series[0].style,
            SeriesStyle::Scatter {
                marker_size: BIFURCATION_MARKER_SIZE
            }
        );
        assert_eq!(figure.series[0].x.len(), diagram.points.len());
    }

    #[test]
    fn bifurcation_ranges_are_fixed_per_component() {
        assert_eq!(bifurcation_range(Component::X), AxisRange::new(3.0, 12.0));
        assert_eq!(bifurcation_range(Component::Y), AxisRange::new(-1.0, 12.0));
        assert_eq!(bifurcation_range(Component::Z), AxisRange::new(-2.0, 27.0));
    }

    #[test]
    fn render_all_visits_every_trajectory_figure_in_order() {
        let figures = trajectory_figures(&trajectory()).expect("figures");
        let mut recorder = Recorder::default();
        render_all(&mut recorder, &figures).expect("render");
        assert_eq!(
            recorder.titles,
            vec![
                "x vs t",
                "y vs t",
                "z vs t",
                "x vs y",
                "y vs z",
                "x vs z",
                "x and y vs z"
            ]
        );
    }

    #[test]
    fn render_all_reports_failing_figure() {
        let figures = trajectory_figures(&trajectory()).expect("figures");
        let err = render_all(&mut Failing, &figures).expect_err("renderer fails");
        assert!(format!("{err:#}").contains("x vs t"));
        assert!(format!("{err:#}").contains("device lost"));
    }
}
