use std::path::{Path, PathBuf};

use itertools::Itertools as _;

use super::PointerDragController;
use super::options::DragOptions;
use super::types::{DragBounds, DragConstraints, ElementId};

pub const OPTIONS_SNAPSHOT_VERSION: u32 = 1;

/// Why drag options could not be saved or loaded.
#[derive(Debug)]
pub enum OptionsPersistenceError {
    /// The snapshot was written by an incompatible version of this crate.
    UnsupportedVersion { found: u32, expected: u32 },

    /// A loaded value cannot drive a drag (e.g. a negative scroll step).
    InvalidOption { field: &'static str, value: f32 },

    /// A constraint bounds an element by itself.
    SelfBounded { target: ElementId },

    Encode(ron::Error),
    Parse(ron::error::SpannedError),

    /// Reading or writing the options file failed.
    File {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for OptionsPersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported drag options snapshot version: {found} (expected {expected})"
                )
            }
            Self::InvalidOption { field, value } => {
                write!(f, "drag option `{field}` has an unusable value: {value}")
            }
            Self::SelfBounded { target } => {
                write!(f, "drag constraints for {target:?} use the element itself as bounds")
            }
            Self::Encode(err) => write!(f, "failed to encode drag options: {err}"),
            Self::Parse(err) => write!(f, "failed to parse drag options: {err}"),
            Self::File { path, source } => {
                write!(f, "drag options file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for OptionsPersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedVersion { .. }
            | Self::InvalidOption { .. }
            | Self::SelfBounded { .. } => None,
            Self::Encode(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::File { source, .. } => Some(source),
        }
    }
}

impl From<ron::Error> for OptionsPersistenceError {
    fn from(err: ron::Error) -> Self {
        Self::Encode(err)
    }
}

impl From<ron::error::SpannedError> for OptionsPersistenceError {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::Parse(err)
    }
}

fn validate(snapshot: &OptionsSnapshot) -> Result<(), OptionsPersistenceError> {
    if snapshot.version != OPTIONS_SNAPSHOT_VERSION {
        return Err(OptionsPersistenceError::UnsupportedVersion {
            found: snapshot.version,
            expected: OPTIONS_SNAPSHOT_VERSION,
        });
    }

    let options = &snapshot.options;
    if !(options.auto_scroll_step.is_finite() && options.auto_scroll_step > 0.0) {
        return Err(OptionsPersistenceError::InvalidOption {
            field: "auto_scroll_step",
            value: options.auto_scroll_step,
        });
    }
    if !(options.auto_scroll_edge_threshold.is_finite()
        && options.auto_scroll_edge_threshold >= 0.0)
    {
        return Err(OptionsPersistenceError::InvalidOption {
            field: "auto_scroll_edge_threshold",
            value: options.auto_scroll_edge_threshold,
        });
    }

    if let Some(&(target, _)) = snapshot
        .constraints
        .iter()
        .find(|(target, c)| c.bounds == DragBounds::Element(*target))
    {
        return Err(OptionsPersistenceError::SelfBounded { target });
    }
    Ok(())
}

/// Controller configuration as stored on disk: options plus per-element constraints.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct OptionsSnapshot {
    pub version: u32,
    pub options: DragOptions,
    #[serde(default)]
    pub constraints: Vec<(ElementId, DragConstraints)>,
}

fn pretty_ron_config() -> ron::ser::PrettyConfig {
    ron::ser::PrettyConfig::new().depth_limit(16)
}

impl PointerDragController {
    pub fn options_snapshot(&self) -> OptionsSnapshot {
        OptionsSnapshot {
            version: OPTIONS_SNAPSHOT_VERSION,
            options: self.options.clone(),
            constraints: self
                .constraints
                .iter()
                .map(|(&id, &c)| (id, c))
                .sorted_by_key(|(id, _)| *id)
                .collect(),
        }
    }

    /// Replace options and constraints. Active sessions keep the constraints they started with.
    ///
    /// # Errors
    /// Fails on a foreign snapshot version, an unusable scroll step or threshold, or a
    /// constraint bounded by its own target. Nothing is replaced in that case.
    pub fn apply_options_snapshot(
        &mut self,
        snapshot: OptionsSnapshot,
    ) -> Result<(), OptionsPersistenceError> {
        validate(&snapshot)?;
        self.options = snapshot.options;
        self.constraints = snapshot.constraints.into_iter().collect();
        Ok(())
    }

    /// # Errors
    /// Fails if RON encoding fails.
    pub fn save_options_ron(&self) -> Result<String, OptionsPersistenceError> {
        Ok(ron::ser::to_string_pretty(
            &self.options_snapshot(),
            pretty_ron_config(),
        )?)
    }

    /// # Errors
    /// Fails on malformed RON, or for the reasons listed on [`Self::apply_options_snapshot`].
    pub fn load_options_ron(&mut self, ron_str: &str) -> Result<(), OptionsPersistenceError> {
        let snapshot: OptionsSnapshot = ron::from_str(ron_str)?;
        self.apply_options_snapshot(snapshot)
    }

    /// # Errors
    /// Fails if encoding or writing the file fails.
    pub fn save_options_to_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(), OptionsPersistenceError> {
        let path = path.as_ref();
        let ron_str = self.save_options_ron()?;
        std::fs::write(path, ron_str).map_err(|source| OptionsPersistenceError::File {
            path: path.to_owned(),
            source,
        })
    }

    /// # Errors
    /// Fails if the file cannot be read, or for the reasons listed on [`Self::load_options_ron`].
    pub fn load_options_from_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<(), OptionsPersistenceError> {
        let path = path.as_ref();
        let ron_str =
            std::fs::read_to_string(path).map_err(|source| OptionsPersistenceError::File {
                path: path.to_owned(),
                source,
            })?;
        self.load_options_ron(&ron_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::types::{DragAxis, DragBounds};

    #[test]
    fn options_survive_a_ron_round_trip() {
        let mut controller = PointerDragController::new(DragOptions {
            auto_scroll_step: 32.0,
            auto_scroll_edge_threshold: 12.0,
            float_to_top_layer: false,
            ..Default::default()
        });
        controller.set_constraints(ElementId(7), DragConstraints::slider(ElementId(6)));

        let ron_str = controller.save_options_ron().expect("serialize");

        let mut restored = PointerDragController::default();
        restored.load_options_ron(&ron_str).expect("deserialize");
        assert_eq!(restored.options, controller.options);
        assert_eq!(
            restored.constraints_for(ElementId(7)),
            DragConstraints {
                axis: DragAxis::Horizontal,
                bounds: DragBounds::Element(ElementId(6)),
                keep_parent: true,
            }
        );
    }

    #[test]
    fn rejects_unknown_snapshot_version() {
        let mut snapshot = PointerDragController::default().options_snapshot();
        snapshot.version = OPTIONS_SNAPSHOT_VERSION + 1;

        let mut controller = PointerDragController::default();
        let err = controller
            .apply_options_snapshot(snapshot)
            .expect_err("future version must be rejected");
        assert!(matches!(
            err,
            OptionsPersistenceError::UnsupportedVersion { found, expected }
                if found == OPTIONS_SNAPSHOT_VERSION + 1 && expected == OPTIONS_SNAPSHOT_VERSION
        ));
    }

    #[test]
    fn garbage_input_is_a_deserialize_error() {
        let mut controller = PointerDragController::default();
        let err = controller
            .load_options_ron("(version: ")
            .expect_err("truncated ron");
        assert!(matches!(err, OptionsPersistenceError::Parse(_)));
    }

    #[test]
    fn unusable_values_are_rejected_and_leave_the_controller_untouched() {
        let mut snapshot = PointerDragController::default().options_snapshot();
        snapshot.options.auto_scroll_step = -4.0;

        let mut controller = PointerDragController::new(DragOptions {
            auto_scroll_step: 9.0,
            ..Default::default()
        });
        let err = controller
            .apply_options_snapshot(snapshot)
            .expect_err("negative step");
        assert!(matches!(
            err,
            OptionsPersistenceError::InvalidOption {
                field: "auto_scroll_step",
                ..
            }
        ));
        assert_eq!(controller.options.auto_scroll_step, 9.0);

        let mut snapshot = PointerDragController::default().options_snapshot();
        snapshot
            .constraints
            .push((ElementId(3), DragConstraints::slider(ElementId(3))));
        let err = controller
            .apply_options_snapshot(snapshot)
            .expect_err("self-bounded slider");
        assert!(matches!(
            err,
            OptionsPersistenceError::SelfBounded { target: ElementId(3) }
        ));
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let path = std::env::temp_dir().join("egui_pointer_drag_no_such_options.ron");
        let mut controller = PointerDragController::default();
        let err = controller
            .load_options_from_file(&path)
            .expect_err("file does not exist");
        assert!(matches!(&err, OptionsPersistenceError::File { path: p, .. } if *p == path));
        assert!(err.to_string().contains("egui_pointer_drag_no_such_options.ron"));
    }
}
