//! The pager state machine - a single-owner, timeout-bounded page navigator.
//!
//! A [`Pager`] owns an immutable snapshot of entries (the record source,
//! fully materialized before construction), a renderer that turns one entry
//! into a [`DisplayPage`], and a set of controls: previous/next navigation,
//! an optional stop control, and caller-supplied custom actions that run a
//! side effect against the entry currently on screen. The pager publishes
//! pages through a [`Transport`] and suspends between user actions; a session
//! ends when the owner presses stop, a custom action requests it, or the
//! inactivity deadline elapses. Navigation past either end clamps instead of
//! failing, and actions from anyone but the session owner are rejected
//! without extending the deadline.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::errors::{Error, Result};

/// Default inactivity window before a session expires.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// One rendered page: the immutable output of a renderer for one entry.
///
/// Re-rendering fully replaces the previous page, fields included, so a
/// transport must never merge a new page into an old one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayPage {
    /// Page title.
    pub title: String,
    /// Body text shown under the title.
    pub description: String,
    /// Optional link the title points at.
    pub url: Option<String>,
    /// Named body sections.
    pub fields: Vec<PageField>,
    /// Footer line, conventionally the "position/total" indicator.
    pub footer: Option<String>,
}

/// A named body section of a [`DisplayPage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageField {
    /// Section heading.
    pub name: String,
    /// Section body.
    pub value: String,
    /// Whether the section may sit next to its neighbors.
    pub inline: bool,
}

impl DisplayPage {
    /// Creates a page with the given title and description.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Sets the title link.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Appends a body section.
    #[must_use]
    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(PageField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Sets the footer line.
    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

/// The fixed action vocabulary a session recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Step back by the session's step size (clamped at 0).
    Previous,
    /// Step forward by the session's step size (clamped at the last entry).
    Next,
    /// End the session and disable its controls.
    Stop,
    /// A caller-supplied action identified by its binding id.
    Custom(String),
}

/// An action as delivered by the transport, tagged with who performed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incoming {
    /// Identity of the user who acted.
    pub actor: u64,
    /// What they did.
    pub action: Action,
}

/// One visible control (button) attached to a published page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    /// The action this control emits.
    pub action: Action,
    /// Button label.
    pub label: String,
    /// Optional unicode emoji shown on the button.
    pub emoji: Option<String>,
    /// Whether the control is greyed out.
    pub disabled: bool,
}

/// Outcome of a custom-action handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    /// Keep navigating; the press is acknowledged silently.
    Continue,
    /// Keep navigating; the given note is sent back as a side-channel
    /// acknowledgement visible only to the owner.
    Acknowledge(String),
    /// End the session as if the owner had pressed stop.
    Stop,
}

/// Renders one entry into a page. Must be pure: equal inputs yield equal
/// pages. `position` is 1-based; `total` is the snapshot length.
pub trait RenderPage<E> {
    /// Produces the page for `entry`.
    fn render(&self, entry: &E, position: usize, total: usize) -> Result<DisplayPage>;
}

impl<E, F> RenderPage<E> for F
where
    F: Fn(&E, usize, usize) -> Result<DisplayPage>,
{
    fn render(&self, entry: &E, position: usize, total: usize) -> Result<DisplayPage> {
        self(entry, position, total)
    }
}

/// Boxed future returned by a custom-action handler.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<SideEffect>> + Send + 'a>>;

type Handler<E> = Box<dyn for<'a> Fn(&'a E) -> HandlerFuture<'a> + Send + Sync>;

/// A caller-supplied action bound to a handler that runs against the entry
/// currently on screen. Handlers never move the position; each invocation is
/// its own atomic unit against whatever store it touches.
pub struct CustomAction<E> {
    id: String,
    label: String,
    emoji: Option<String>,
    handler: Handler<E>,
}

impl<E> CustomAction<E> {
    /// Binds `id` (the transport-facing identifier) and a button label to a
    /// handler.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        handler: impl for<'a> Fn(&'a E) -> HandlerFuture<'a> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            emoji: None,
            handler: Box::new(handler),
        }
    }

    /// Sets the button emoji.
    #[must_use]
    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }
}

impl<E> std::fmt::Debug for CustomAction<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// The session's view of the chat platform.
///
/// `publish` shows the initial page, `update` edits it in place, and
/// `next_action` suspends until the next user action or until `wait` elapses
/// (returning `Ok(None)` on expiry). Failures are surfaced as
/// [`Error::Framework`]-style errors and end the session; the pager never
/// retries a transport call.
pub trait Transport {
    /// Shows the initial page with its controls.
    fn publish(
        &mut self,
        page: &DisplayPage,
        controls: &[Control],
    ) -> impl Future<Output = Result<()>> + Send;

    /// Replaces the visible page and controls in place.
    fn update(
        &mut self,
        page: &DisplayPage,
        controls: &[Control],
    ) -> impl Future<Output = Result<()>> + Send;

    /// Acknowledges a press that changed nothing visible. `note` carries an
    /// optional side-channel message from a custom-action handler.
    fn acknowledge(&mut self, note: Option<&str>) -> impl Future<Output = Result<()>> + Send;

    /// Tells a non-owner their press was ignored.
    fn reject(&mut self, reason: &str) -> impl Future<Output = Result<()>> + Send;

    /// Greys out all controls on the visible page. Must be idempotent and
    /// must tolerate the underlying message having been deleted.
    fn disable_controls(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Suspends until the next action arrives or `wait` elapses.
    fn next_action(&mut self, wait: Duration)
    -> impl Future<Output = Result<Option<Incoming>>> + Send;
}

/// A single navigation session over an immutable snapshot of entries.
///
/// Construction makes no transport call; nothing is rendered until
/// [`Pager::run`] is invoked. The snapshot must be non-empty: callers check
/// for "nothing found" and report it themselves before building a session.
pub struct Pager<E, R> {
    entries: Vec<E>,
    renderer: R,
    owner: u64,
    step: usize,
    timeout: Duration,
    actions: Vec<CustomAction<E>>,
    stop_control: bool,
    position: usize,
    finished: bool,
}

impl<E, R> Pager<E, R>
where
    E: Send + Sync,
    R: RenderPage<E> + Send + Sync,
{
    /// Creates a session owned by `owner` over `entries`.
    ///
    /// Returns [`Error::EmptySource`] if the snapshot is empty.
    pub fn new(entries: Vec<E>, renderer: R, owner: u64) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptySource);
        }
        Ok(Self {
            entries,
            renderer,
            owner,
            step: 1,
            timeout: DEFAULT_TIMEOUT,
            actions: Vec::new(),
            stop_control: false,
            position: 0,
            finished: false,
        })
    }

    /// Sets how many entries a navigation press moves by (minimum 1).
    #[must_use]
    pub fn step_size(mut self, step: usize) -> Self {
        self.step = step.max(1);
        self
    }

    /// Sets the inactivity window.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a custom action binding.
    #[must_use]
    pub fn action(mut self, action: CustomAction<E>) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds the reserved stop control.
    #[must_use]
    pub fn with_stop(mut self) -> Self {
        self.stop_control = true;
        self
    }

    /// Current 0-based position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the session has reached a terminal state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Drives the session to completion: publishes page 0, then processes
    /// one action at a time until stop or deadline expiry.
    pub async fn run<T: Transport + Send>(&mut self, transport: &mut T) -> Result<()> {
        transport
            .publish(&self.render_current()?, &self.controls())
            .await?;

        let mut deadline = Instant::now() + self.timeout;

        while !self.finished {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let Some(incoming) = transport.next_action(remaining).await? else {
                // Normal expiry, not an error. Controls go grey exactly once;
                // the finished flag keeps any racing late action out.
                self.finished = true;
                transport.disable_controls().await?;
                break;
            };

            if incoming.actor != self.owner {
                debug!(actor = incoming.actor, owner = self.owner, "ignoring non-owner action");
                transport
                    .reject("Only the person who started this session can use its controls.")
                    .await?;
                continue;
            }

            match incoming.action {
                Action::Previous => {
                    self.position = self.position.saturating_sub(self.step);
                    transport
                        .update(&self.render_current()?, &self.controls())
                        .await?;
                    deadline = Instant::now() + self.timeout;
                }
                Action::Next => {
                    self.position = (self.position + self.step).min(self.entries.len() - 1);
                    transport
                        .update(&self.render_current()?, &self.controls())
                        .await?;
                    deadline = Instant::now() + self.timeout;
                }
                Action::Stop => {
                    self.finished = true;
                    transport.disable_controls().await?;
                }
                Action::Custom(id) => {
                    let Some(action) = self.actions.iter().find(|a| a.id == id) else {
                        debug!(id = %id, "ignoring unrecognized custom action");
                        transport.acknowledge(None).await?;
                        continue;
                    };
                    let effect = (action.handler)(&self.entries[self.position]).await?;
                    match effect {
                        SideEffect::Continue => transport.acknowledge(None).await?,
                        SideEffect::Acknowledge(note) => {
                            transport.acknowledge(Some(&note)).await?;
                        }
                        SideEffect::Stop => {
                            self.finished = true;
                            transport.disable_controls().await?;
                            continue;
                        }
                    }
                    deadline = Instant::now() + self.timeout;
                }
            }
        }

        Ok(())
    }

    fn render_current(&self) -> Result<DisplayPage> {
        self.renderer
            .render(&self.entries[self.position], self.position + 1, self.entries.len())
    }

    /// Both navigation controls are always present; out-of-range presses
    /// clamp instead of hiding buttons at the boundaries. Terminal disabling
    /// is the transport's job.
    fn controls(&self) -> Vec<Control> {
        let mut controls = vec![
            Control {
                action: Action::Previous,
                label: "Previous".to_owned(),
                emoji: Some("⬅".to_owned()),
                disabled: false,
            },
            Control {
                action: Action::Next,
                label: "Next".to_owned(),
                emoji: Some("➡".to_owned()),
                disabled: false,
            },
        ];
        for action in &self.actions {
            controls.push(Control {
                action: Action::Custom(action.id.clone()),
                label: action.label.clone(),
                emoji: action.emoji.clone(),
                disabled: false,
            });
        }
        if self.stop_control {
            controls.push(Control {
                action: Action::Stop,
                label: "Stop".to_owned(),
                emoji: Some("⏹".to_owned()),
                disabled: false,
            });
        }
        controls
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    fn render_entry(entry: &String, position: usize, total: usize) -> Result<DisplayPage> {
        Ok(DisplayPage::new("Deck", entry.clone()).footer(format!("{position}/{total}")))
    }

    fn entries(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("entry-{i}")).collect()
    }

    const OWNER: u64 = 7;

    fn press(action: Action) -> Option<Incoming> {
        Some(Incoming {
            actor: OWNER,
            action,
        })
    }

    /// Scripted transport: pops one scripted result per `next_action` call
    /// and records everything the pager asks it to show.
    #[derive(Default)]
    struct MockTransport {
        script: VecDeque<Option<Incoming>>,
        advance_per_wait: Duration,
        published: Vec<DisplayPage>,
        updated: Vec<DisplayPage>,
        waits: Vec<Duration>,
        acks: Vec<Option<String>>,
        rejections: usize,
        disables: usize,
    }

    impl MockTransport {
        fn scripted(actions: Vec<Option<Incoming>>) -> Self {
            Self {
                script: actions.into(),
                ..Self::default()
            }
        }

        fn footers(&self) -> Vec<String> {
            self.updated
                .iter()
                .map(|p| p.footer.clone().unwrap_or_default())
                .collect()
        }
    }

    impl Transport for MockTransport {
        async fn publish(&mut self, page: &DisplayPage, _controls: &[Control]) -> Result<()> {
            self.published.push(page.clone());
            Ok(())
        }

        async fn update(&mut self, page: &DisplayPage, _controls: &[Control]) -> Result<()> {
            self.updated.push(page.clone());
            Ok(())
        }

        async fn acknowledge(&mut self, note: Option<&str>) -> Result<()> {
            self.acks.push(note.map(str::to_owned));
            Ok(())
        }

        async fn reject(&mut self, _reason: &str) -> Result<()> {
            self.rejections += 1;
            Ok(())
        }

        async fn disable_controls(&mut self) -> Result<()> {
            self.disables += 1;
            Ok(())
        }

        async fn next_action(&mut self, wait: Duration) -> Result<Option<Incoming>> {
            self.waits.push(wait);
            if !self.advance_per_wait.is_zero() {
                tokio::time::advance(self.advance_per_wait).await;
            }
            Ok(self.script.pop_front().unwrap_or(None))
        }
    }

    #[test]
    fn empty_source_is_rejected_at_construction() {
        let result = Pager::new(Vec::<String>::new(), render_entry, OWNER);
        assert!(matches!(result, Err(Error::EmptySource)));
    }

    #[test]
    fn renderer_is_deterministic_for_equal_inputs() {
        let entry = "entry-3".to_owned();
        let first = render_entry(&entry, 4, 5).unwrap();
        let second = render_entry(&entry, 4, 5).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn next_next_previous_traces_positions() {
        // Scenario: length 5, step 1, actions [Next, Next, Previous].
        let mut pager = Pager::new(entries(5), render_entry, OWNER).unwrap();
        let mut transport = MockTransport::scripted(vec![
            press(Action::Next),
            press(Action::Next),
            press(Action::Previous),
        ]);

        pager.run(&mut transport).await.unwrap();

        assert_eq!(transport.published[0].footer.as_deref(), Some("1/5"));
        assert_eq!(transport.footers(), vec!["2/5", "3/5", "2/5"]);
        assert_eq!(pager.position(), 1);
        // Session expired after the script ran out.
        assert!(pager.is_finished());
        assert_eq!(transport.disables, 1);
    }

    #[tokio::test]
    async fn navigation_clamps_at_both_ends() {
        // Single entry: both directions are no-ops and stay in bounds.
        let mut pager = Pager::new(entries(1), render_entry, OWNER).unwrap();
        let mut transport = MockTransport::scripted(vec![
            press(Action::Next),
            press(Action::Next),
            press(Action::Previous),
            press(Action::Previous),
        ]);

        pager.run(&mut transport).await.unwrap();

        assert_eq!(transport.published[0].footer.as_deref(), Some("1/1"));
        assert_eq!(transport.footers(), vec!["1/1", "1/1", "1/1", "1/1"]);
        assert_eq!(pager.position(), 0);
    }

    #[tokio::test]
    async fn step_size_clamps_to_nearest_boundary() {
        let mut pager = Pager::new(entries(5), render_entry, OWNER)
            .unwrap()
            .step_size(2);
        let mut transport = MockTransport::scripted(vec![
            press(Action::Next),
            press(Action::Next),
            press(Action::Next),
            press(Action::Previous),
            press(Action::Previous),
            press(Action::Previous),
        ]);

        pager.run(&mut transport).await.unwrap();

        // 0 -> 2 -> 4 -> 4 (clamped) -> 2 -> 0 -> 0 (clamped)
        assert_eq!(
            transport.footers(),
            vec!["3/5", "5/5", "5/5", "3/5", "1/5", "1/5"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn non_owner_actions_are_rejected_without_deadline_reset() {
        let timeout = Duration::from_secs(60);
        let mut pager = Pager::new(entries(3), render_entry, OWNER)
            .unwrap()
            .timeout(timeout);
        let mut transport = MockTransport::scripted(vec![
            Some(Incoming {
                actor: OWNER + 1,
                action: Action::Next,
            }),
            press(Action::Next),
        ]);
        transport.advance_per_wait = Duration::from_secs(10);

        pager.run(&mut transport).await.unwrap();

        assert_eq!(transport.rejections, 1);
        // The stranger's press did not move the position.
        assert_eq!(transport.footers(), vec!["2/3"]);
        // Waits: fresh 60s, then 50s (stranger did not reset the deadline),
        // then a fresh 60s after the owner's accepted press.
        assert_eq!(
            transport.waits,
            vec![
                Duration::from_secs(60),
                Duration::from_secs(50),
                Duration::from_secs(60)
            ]
        );
    }

    #[tokio::test]
    async fn deadline_expiry_disables_controls_exactly_once() {
        let mut pager = Pager::new(entries(2), render_entry, OWNER).unwrap();
        let mut transport = MockTransport::scripted(vec![None]);

        pager.run(&mut transport).await.unwrap();

        assert!(pager.is_finished());
        assert_eq!(transport.disables, 1);
        assert_eq!(transport.waits.len(), 1);
    }

    #[tokio::test]
    async fn stop_is_terminal_and_stale_actions_are_not_processed() {
        let mut pager = Pager::new(entries(4), render_entry, OWNER)
            .unwrap()
            .with_stop();
        let mut transport =
            MockTransport::scripted(vec![press(Action::Stop), press(Action::Next)]);

        pager.run(&mut transport).await.unwrap();

        assert!(pager.is_finished());
        assert_eq!(transport.disables, 1);
        assert_eq!(pager.position(), 0);
        // The stale Next was never pulled off the transport.
        assert_eq!(transport.script.len(), 1);
        assert!(transport.updated.is_empty());
    }

    #[tokio::test]
    async fn custom_action_runs_once_against_current_entry() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::default();
        let recorder = Arc::clone(&seen);
        let commit = CustomAction::new("commit", "Save", move |entry: &String| {
            let recorder = Arc::clone(&recorder);
            let entry = entry.clone();
            Box::pin(async move {
                recorder.lock().unwrap().push(entry);
                Ok(SideEffect::Acknowledge("Saved.".to_owned()))
            }) as HandlerFuture<'_>
        });

        let mut pager = Pager::new(entries(5), render_entry, OWNER)
            .unwrap()
            .action(commit);
        let mut transport = MockTransport::scripted(vec![
            press(Action::Next),
            press(Action::Next),
            press(Action::Custom("commit".to_owned())),
        ]);

        pager.run(&mut transport).await.unwrap();

        assert_eq!(seen.lock().unwrap().as_slice(), ["entry-2".to_owned()]);
        // Position is unchanged by the side effect.
        assert_eq!(pager.position(), 2);
        assert_eq!(transport.acks, vec![Some("Saved.".to_owned())]);
    }

    #[tokio::test]
    async fn custom_action_can_request_stop() {
        let discard = CustomAction::new("discard", "Discard", |_: &String| {
            Box::pin(async { Ok(SideEffect::Stop) }) as HandlerFuture<'_>
        });

        let mut pager = Pager::new(entries(2), render_entry, OWNER)
            .unwrap()
            .action(discard);
        let mut transport =
            MockTransport::scripted(vec![press(Action::Custom("discard".to_owned()))]);

        pager.run(&mut transport).await.unwrap();

        assert!(pager.is_finished());
        assert_eq!(transport.disables, 1);
        assert!(transport.acks.is_empty());
    }

    #[tokio::test]
    async fn unrecognized_custom_id_is_ignored() {
        let mut pager = Pager::new(entries(3), render_entry, OWNER).unwrap();
        let mut transport =
            MockTransport::scripted(vec![press(Action::Custom("bogus".to_owned()))]);

        pager.run(&mut transport).await.unwrap();

        assert_eq!(pager.position(), 0);
        assert_eq!(transport.acks, vec![None]);
        assert!(transport.updated.is_empty());
    }

    #[tokio::test]
    async fn controls_include_customs_and_stop() {
        let noop = CustomAction::new("noop", "Noop", |_: &String| {
            Box::pin(async { Ok(SideEffect::Continue) }) as HandlerFuture<'_>
        });
        let pager = Pager::new(entries(2), render_entry, OWNER)
            .unwrap()
            .action(noop)
            .with_stop();

        let controls = pager.controls();
        let actions: Vec<&Action> = controls.iter().map(|c| &c.action).collect();
        assert_eq!(
            actions,
            vec![
                &Action::Previous,
                &Action::Next,
                &Action::Custom("noop".to_owned()),
                &Action::Stop,
            ]
        );
        assert!(controls.iter().all(|c| !c.disabled));
    }
}
