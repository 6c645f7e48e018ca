use foundation::bounds::Recenter;
use gallery::{FetchError, GallerySource, Player};
use layers::frame::{FrameStats, RenderFrame, build_frame};
use layers::location::LocationOverlay;
use layers::sink::RenderSink;
use runtime::notices::{NoticeBus, NoticeLevel};
use runtime::tick::Tick;
use targets::collected::CollectedSet;
use targets::dataset::{Dataset, LoadReport};
use targets::display::annotate;
use targets::search::{self, FocusError, SearchIndex};
use targets::target::Target;
use targets::visibility::filter_visible;

use crate::config::EngineConfig;
use crate::selection::{SelectionOutcome, SelectionState, SelectionTicket};
use crate::tracker::{LocationEvent, LocationTracker, TrackerCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The target set is static for a session.
    DatasetAlreadyLoaded,
    Fetch(FetchError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::DatasetAlreadyLoaded => f.write_str("targets are already loaded for this session"),
            SessionError::Fetch(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::DatasetAlreadyLoaded => None,
            SessionError::Fetch(err) => Some(err),
        }
    }
}

impl From<FetchError> for SessionError {
    fn from(err: FetchError) -> Self {
        SessionError::Fetch(err)
    }
}

/// One map session.
///
/// All recomputation is synchronous: each operation that can change what is
/// on screen ends by pushing a complete frame to the sink. Async operations
/// only suspend on the fetch itself.
pub struct Session<S: RenderSink> {
    config: EngineConfig,
    dataset: Option<Dataset>,
    index: SearchIndex,
    selection: SelectionState,
    roster: Vec<Player>,
    tracker: LocationTracker,
    notices: NoticeBus,
    drawn_overlay: LocationOverlay,
    sink: S,
}

impl<S: RenderSink> Session<S> {
    pub fn new(config: EngineConfig, sink: S) -> Self {
        let tracker = LocationTracker::new(config.tracker);
        Self {
            config,
            dataset: None,
            index: SearchIndex::default(),
            selection: SelectionState::new(),
            roster: Vec::new(),
            tracker,
            notices: NoticeBus::new(),
            drawn_overlay: LocationOverlay::default(),
            sink,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    pub fn collected(&self) -> &CollectedSet {
        self.selection.collected()
    }

    pub fn selected_uid(&self) -> Option<&str> {
        self.selection.selected_uid()
    }

    pub fn tracker(&self) -> &LocationTracker {
        &self.tracker
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // --- dataset -------------------------------------------------------

    pub async fn load_dataset(&mut self, source: &dyn GallerySource) -> Result<LoadReport, SessionError> {
        if self.dataset.is_some() {
            tracing::warn!("ignoring second dataset load");
            return Err(SessionError::DatasetAlreadyLoaded);
        }
        match source.fetch_targets().await {
            Ok(targets) => self.install_dataset(targets),
            Err(err) => {
                self.notify(NoticeLevel::Error, "dataset", format!("could not load targets: {err}"));
                Err(err.into())
            }
        }
    }

    pub fn install_dataset(
        &mut self,
        targets: impl IntoIterator<Item = Target>,
    ) -> Result<LoadReport, SessionError> {
        if self.dataset.is_some() {
            tracing::warn!("ignoring second dataset load");
            return Err(SessionError::DatasetAlreadyLoaded);
        }
        let dataset = Dataset::from_targets(targets);
        let report = dataset.report();
        self.index = SearchIndex::new(&dataset);
        self.dataset = Some(dataset);

        if report.unparseable() > 0 {
            self.notify(
                NoticeLevel::Warning,
                "dataset",
                format!(
                    "{} of {} targets could not be displayed",
                    report.unparseable(),
                    report.loaded
                ),
            );
        }
        self.refresh();
        Ok(report)
    }

    /// Replaces the roster; on failure the previous roster is kept.
    pub async fn load_roster(&mut self, source: &dyn GallerySource) -> Result<usize, SessionError> {
        match source.fetch_roster().await {
            Ok(roster) => {
                tracing::info!(players = roster.len(), "roster loaded");
                self.roster = roster;
                Ok(self.roster.len())
            }
            Err(err) => {
                self.notify(NoticeLevel::Error, "roster", format!("could not load players: {err}"));
                Err(err.into())
            }
        }
    }

    // --- render pipeline ------------------------------------------------

    /// Filter, resolve, cluster, and push a full frame for the current
    /// viewport.
    pub fn refresh(&mut self) -> FrameStats {
        let viewport = self.sink.viewport();
        let frame = match &self.dataset {
            Some(dataset) => {
                let pass = filter_visible(dataset, &viewport.bounds);
                let annotated = annotate(&pass.targets, self.selection.collected());
                build_frame(&annotated, viewport.zoom, &self.config.cluster, pass.report)
            }
            None => RenderFrame {
                zoom: viewport.zoom,
                ..RenderFrame::default()
            },
        };
        let stats = frame.stats;
        tracing::debug!(
            visible = stats.visible,
            markers = stats.markers,
            clusters = stats.clusters,
            "frame built"
        );
        self.sink.replace_all(frame);
        stats
    }

    pub fn on_viewport_changed(&mut self) -> FrameStats {
        self.refresh()
    }

    // --- selection ------------------------------------------------------

    pub fn begin_selection(&mut self, uid: &str) -> SelectionTicket {
        self.selection.begin(uid)
    }

    pub fn complete_selection(
        &mut self,
        ticket: SelectionTicket,
        result: Result<CollectedSet, FetchError>,
    ) -> SelectionOutcome {
        let outcome = self.selection.complete(&ticket, result);
        match &outcome {
            SelectionOutcome::Applied => {
                self.refresh();
            }
            SelectionOutcome::Failed(err) => self.notify(
                NoticeLevel::Error,
                "selection",
                format!("could not load progress for {}: {err}", ticket.uid()),
            ),
            SelectionOutcome::Stale => {}
        }
        outcome
    }

    pub async fn select_player(&mut self, source: &dyn GallerySource, uid: &str) -> SelectionOutcome {
        let ticket = self.begin_selection(uid);
        let result = source.fetch_completion(uid).await;
        self.complete_selection(ticket, result)
    }

    /// Logout: back to raw statuses. In-flight fetches become stale.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.refresh();
    }

    // --- search ---------------------------------------------------------

    pub fn search(&self, query: &str) -> Vec<&Target> {
        match &self.dataset {
            Some(dataset) => self.index.query(dataset, query),
            None => Vec::new(),
        }
    }

    pub fn focus(&mut self, id: &str) -> Result<Recenter, FocusError> {
        let result = match &self.dataset {
            Some(dataset) => search::focus(dataset, id, self.config.focus_zoom),
            None => Err(FocusError::UnknownTarget(id.to_string())),
        };
        match result {
            Ok(command) => {
                self.recenter(command);
                Ok(command)
            }
            Err(err) => {
                self.notify(NoticeLevel::Warning, "search", err.to_string());
                Err(err)
            }
        }
    }

    // --- location -------------------------------------------------------

    /// Returns the platform requests the host must carry out.
    pub fn start_tracking(&mut self) -> Vec<TrackerCommand> {
        let commands = self.tracker.start();
        self.dispatch(commands)
    }

    pub fn stop_tracking(&mut self) -> Vec<TrackerCommand> {
        let commands = self.tracker.stop();
        self.dispatch(commands)
    }

    pub fn handle_location(&mut self, event: LocationEvent) -> Vec<TrackerCommand> {
        let commands = self.tracker.handle(event);
        self.dispatch(commands)
    }

    pub fn advance(&mut self, tick: Tick) -> bool {
        if self.tracker.advance(tick) {
            self.sync_overlay();
            true
        } else {
            false
        }
    }

    fn dispatch(&mut self, commands: Vec<TrackerCommand>) -> Vec<TrackerCommand> {
        let (platform, local): (Vec<_>, Vec<_>) =
            commands.into_iter().partition(TrackerCommand::is_platform_request);
        for command in local {
            match command {
                TrackerCommand::Recenter(recenter) => self.recenter(recenter),
                TrackerCommand::Notice { level, message } => self.notify(level, "location", message),
                _ => {}
            }
        }
        self.sync_overlay();
        platform
    }

    fn sync_overlay(&mut self) {
        let overlay = self.tracker.overlay();
        if overlay != self.drawn_overlay {
            self.sink.draw_location(overlay);
            self.drawn_overlay = overlay;
        }
    }

    fn recenter(&mut self, command: Recenter) {
        self.sink.recenter(command);
        self.refresh();
    }

    fn notify(&mut self, level: NoticeLevel, kind: &'static str, message: impl Into<String>) {
        self.notices.emit(level, kind, message);
        for notice in self.notices.drain() {
            self.sink.show_notice(&notice);
        }
    }
}
