//! Viewer session: the caller-owned state around the projector.
//!
//! A [`Session`] holds the log being inspected, where it came from, the
//! cursor, and which containers are on screen. The projector itself keeps
//! no state; everything a front end needs between calls lives here.

use serde::Serialize;
use tracing::info;

use stateviz_log::{EventLog, cursor, example::example_log};
use stateviz_types::{EntryId, Projection, ProvenanceKey};

use crate::ProjectionError;
use crate::cache::ProjectionCache;
use crate::config::StateVizConfig;
use crate::projector::project;

/// Where the session's log came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSource {
    /// The built-in example log.
    Default,
    /// A log supplied by the user.
    UserProvided,
}

/// Whether a container is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSelection {
    /// Container name.
    pub name: String,
    /// Whether it is displayed.
    pub selected: bool,
}

/// One displayed container at the current cursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerView {
    /// Container name.
    pub name: String,
    /// Replayed value and provenance.
    pub projection: Projection,
}

/// Caller-owned viewer state.
#[derive(Debug)]
pub struct Session {
    log: EventLog,
    source: LogSource,
    cursor: Option<EntryId>,
    selection: Vec<ContainerSelection>,
    initial_visible: usize,
    cache: Option<ProjectionCache>,
}

impl Session {
    /// Start a session on the built-in example log.
    ///
    /// The first `viewer.initial_visible` containers are selected and the
    /// cursor sits on the first entry.
    pub fn new(config: &StateVizConfig) -> Self {
        Self::with_log(example_log(), LogSource::Default, config)
    }

    /// Start a session on `log`.
    ///
    /// For [`LogSource::Default`] only the first `viewer.initial_visible`
    /// containers are selected; for [`LogSource::UserProvided`] all are.
    pub fn with_log(log: EventLog, source: LogSource, config: &StateVizConfig) -> Self {
        let cache = config
            .cache
            .enabled
            .then(|| ProjectionCache::new(config.cache.max_entries));
        let mut session = Self {
            log: EventLog::default(),
            source,
            cursor: None,
            selection: Vec::new(),
            initial_visible: config.viewer.initial_visible,
            cache,
        };
        session.replace_log(log, source);
        session
    }

    /// Replace the log with one supplied by the user.
    ///
    /// Every container of the new log is selected and the cursor is clamped
    /// onto it.
    pub fn load_user_log(&mut self, log: EventLog) {
        self.replace_log(log, LogSource::UserProvided);
    }

    fn replace_log(&mut self, log: EventLog, source: LogSource) {
        let visible = match source {
            LogSource::Default => self.initial_visible,
            LogSource::UserProvided => usize::MAX,
        };
        self.selection = log
            .container_names()
            .into_iter()
            .enumerate()
            .map(|(index, name)| ContainerSelection {
                name: name.to_owned(),
                selected: index < visible,
            })
            .collect();
        self.cursor = cursor::clamp(&log, self.cursor);
        self.source = source;
        self.log = log;
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }

        info!(
            log_id = %self.log.id(),
            source = ?self.source,
            entries = self.log.len(),
            containers = self.selection.len(),
            "session log loaded"
        );
    }

    /// The log under inspection.
    pub const fn log(&self) -> &EventLog {
        &self.log
    }

    /// Where the log came from.
    pub const fn source(&self) -> LogSource {
        self.source
    }

    /// The current cursor.
    pub const fn cursor(&self) -> Option<EntryId> {
        self.cursor
    }

    /// Every container with its selection flag, in first-appearance order.
    pub fn selection(&self) -> &[ContainerSelection] {
        &self.selection
    }

    /// Names of the selected containers.
    pub fn selected_names(&self) -> Vec<&str> {
        self.selection
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Flip a container's selection. Returns the new state, or `None` if the
    /// log has no such container.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        let entry = self.selection.iter_mut().find(|s| s.name == name)?;
        entry.selected = !entry.selected;
        Some(entry.selected)
    }

    /// Show exactly the named containers. Unknown names are ignored.
    pub fn show_only<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        let wanted: Vec<&str> = names.into_iter().collect();
        for selection in &mut self.selection {
            selection.selected = wanted.contains(&selection.name.as_str());
        }
    }

    /// Move the cursor to `entry`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::UnknownCursor`] if the log has no such
    /// entry; the cursor is left unchanged.
    pub fn select(&mut self, entry: EntryId) -> Result<(), ProjectionError> {
        if !self.log.contains(entry) {
            return Err(ProjectionError::UnknownCursor { cursor: entry });
        }
        self.cursor = Some(entry);
        Ok(())
    }

    /// Move the cursor one entry forward, stopping at the end.
    pub fn step_forward(&mut self) -> Option<EntryId> {
        self.cursor = cursor::next(&self.log, self.cursor);
        self.cursor
    }

    /// Move the cursor one entry back, stopping at the start.
    pub fn step_back(&mut self) -> Option<EntryId> {
        self.cursor = cursor::prev(&self.log, self.cursor);
        self.cursor
    }

    /// Replay one container at the cursor. `None` when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::UnknownCursor`] if the cursor is stale.
    pub fn project(&mut self, container: &str) -> Result<Option<Projection>, ProjectionError> {
        let Some(cursor) = self.cursor else {
            return Ok(None);
        };
        let projection = match self.cache.as_mut() {
            Some(cache) => cache.get_or_project(&self.log, container, cursor)?.clone(),
            None => project(&self.log, container, cursor)?,
        };
        Ok(Some(projection))
    }

    /// One view per selected container, in selection order.
    ///
    /// Empty when there is no cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::UnknownCursor`] if the cursor is stale.
    pub fn views(&mut self) -> Result<Vec<ContainerView>, ProjectionError> {
        let names: Vec<String> = self
            .selected_names()
            .into_iter()
            .map(str::to_owned)
            .collect();
        self.views_of(names.iter().map(String::as_str))
    }

    /// One view per requested name, in request order, regardless of the
    /// selection. A name the log never mutates gets an unset view.
    ///
    /// Empty when there is no cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::UnknownCursor`] if the cursor is stale.
    pub fn views_of<'a>(
        &mut self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<ContainerView>, ProjectionError> {
        let mut views = Vec::new();
        for name in names {
            let Some(projection) = self.project(name)? else {
                return Ok(Vec::new());
            };
            views.push(ContainerView {
                name: name.to_owned(),
                projection,
            });
        }
        Ok(views)
    }

    /// Move the cursor to the entry that last wrote `key` of `container`.
    ///
    /// Returns the new cursor, or `None` (cursor unchanged) when the element
    /// has no recorded writer at the current cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::UnknownCursor`] if the cursor is stale.
    pub fn jump_to_origin(
        &mut self,
        container: &str,
        key: &ProvenanceKey,
    ) -> Result<Option<EntryId>, ProjectionError> {
        let origin = self
            .project(container)?
            .and_then(|projection| projection.origin(key));
        if let Some(entry) = origin {
            self.cursor = Some(entry);
        }
        Ok(origin)
    }
}
