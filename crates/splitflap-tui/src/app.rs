use std::sync::Arc;

use anyhow::{Context, Result};
use splitflap_core::config::{CyclerPreset, RevealPreset};
use splitflap_core::{
    spawn_cycler, spawn_reveal, AppConfig, CycleFrame, EasingType, EffectHandle, PeriodicCycler,
    RevealFrame,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::theme::Theme;
use crate::transition::Crossfade;

/// On-screen position an effect renders into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Logo,
    Inline,
    Button(usize),
    Tagline,
    Accent,
}

/// A frame from a running effect, tagged with its slot
#[derive(Debug, Clone)]
pub enum EffectUpdate {
    Reveal { slot: Slot, frame: RevealFrame },
    Cycle { slot: Slot, frame: CycleFrame },
}

/// Latest frame of a reveal
#[derive(Debug, Clone)]
pub struct RevealView {
    pub frame: RevealFrame,
}

impl RevealView {
    fn from_preset(preset: &RevealPreset) -> Self {
        Self {
            frame: RevealFrame {
                text: preset.text.clone(),
                step: 0,
                locked: preset.text.chars().count(),
                finished: false,
            },
        }
    }

    /// Whether position `index` shows its final glyph
    pub fn is_locked(&self, index: usize) -> bool {
        index < self.frame.locked
    }

    pub fn is_scrambling(&self) -> bool {
        self.frame.step > 0 && !self.frame.finished
    }
}

/// Crossfade state of a cycler
#[derive(Debug, Clone)]
pub struct CyclerView {
    pub fade: Crossfade,
    /// Widest item, so the line does not jump around
    pub width: usize,
    pub index: usize,
}

impl CyclerView {
    fn new(cycler: &PeriodicCycler, easing: EasingType) -> Self {
        let first = cycler.current();
        Self {
            fade: Crossfade::new(first.text, cycler.transition(), easing),
            width: cycler.max_width(),
            index: first.index,
        }
    }
}

/// Landing screen state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub logo: RevealView,
    pub inline: RevealView,
    pub buttons: Vec<RevealView>,
    pub tagline: CyclerView,
    pub accent: CyclerView,
    pub selected_button: usize,
    pub flap_cards: bool,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub should_quit: bool,
    handles: Vec<(Slot, EffectHandle)>,
}

impl App {
    /// Build the screen state; fails on an invalid cycler preset
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Result<Self> {
        let tagline = build_cycler(Slot::Tagline, &config.cycler.tagline)?;
        let accent = build_cycler(Slot::Accent, &config.cycler.accent)?;

        Ok(Self {
            logo: RevealView::from_preset(&config.reveal.logo),
            inline: RevealView::from_preset(&config.reveal.inline),
            buttons: config
                .reveal
                .buttons
                .iter()
                .map(RevealView::from_preset)
                .collect(),
            tagline: CyclerView::new(&tagline, config.cycler.tagline.easing),
            accent: CyclerView::new(&accent, config.cycler.accent.easing),
            selected_button: 0,
            flap_cards: config.ui.flap_cards,
            show_help: false,
            status_message: None,
            should_quit: false,
            handles: Vec::new(),
            theme,
            config,
        })
    }

    /// Start every effect on its own timer. Frames arrive on the returned channel.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&mut self) -> Result<mpsc::UnboundedReceiver<EffectUpdate>> {
        self.unmount();
        let (tx, rx) = mpsc::unbounded_channel();
        let config = Arc::clone(&self.config);

        self.mount_reveal(Slot::Logo, &config.reveal.logo, &tx)?;
        self.mount_reveal(Slot::Inline, &config.reveal.inline, &tx)?;
        for (i, preset) in config.reveal.buttons.iter().enumerate() {
            self.mount_reveal(Slot::Button(i), preset, &tx)?;
        }
        self.mount_cycler(Slot::Tagline, &config.cycler.tagline, &tx)?;
        self.mount_cycler(Slot::Accent, &config.cycler.accent, &tx)?;

        info!("Mounted {} effects", self.handles.len());
        Ok(rx)
    }

    fn mount_reveal(
        &mut self,
        slot: Slot,
        preset: &RevealPreset,
        tx: &mpsc::UnboundedSender<EffectUpdate>,
    ) -> Result<()> {
        let reveal = preset
            .to_reveal()
            .with_context(|| format!("invalid reveal preset for {:?}", slot))?;
        let handle = spawn_reveal(
            reveal,
            update_sink(tx.clone(), move |frame: &RevealFrame| EffectUpdate::Reveal {
                slot,
                frame: frame.clone(),
            }),
        );
        debug!(effect = %handle.id(), ?slot, "Mounted reveal");
        self.handles.push((slot, handle));
        Ok(())
    }

    fn mount_cycler(
        &mut self,
        slot: Slot,
        preset: &CyclerPreset,
        tx: &mpsc::UnboundedSender<EffectUpdate>,
    ) -> Result<()> {
        let cycler = build_cycler(slot, preset)?;
        let handle = spawn_cycler(
            cycler,
            update_sink(tx.clone(), move |frame: &CycleFrame| EffectUpdate::Cycle {
                slot,
                frame: frame.clone(),
            }),
        );
        debug!(effect = %handle.id(), ?slot, "Mounted cycler");
        self.handles.push((slot, handle));
        Ok(())
    }

    /// Cancel every effect; no update is produced afterwards
    pub fn unmount(&mut self) {
        for (_, handle) in &self.handles {
            handle.cancel();
        }
        self.handles.clear();
    }

    pub fn mounted_count(&self) -> usize {
        self.handles.len()
    }

    /// Apply a frame from the effect channel
    pub fn apply(&mut self, update: EffectUpdate) {
        match update {
            EffectUpdate::Reveal { slot, frame } => {
                if let Some(view) = self.reveal_view_mut(slot) {
                    view.frame = frame;
                }
            }
            EffectUpdate::Cycle { slot, frame } => {
                let view = match slot {
                    Slot::Tagline => &mut self.tagline,
                    Slot::Accent => &mut self.accent,
                    _ => return,
                };
                view.index = frame.index;
                if frame.previous.is_some() {
                    view.fade.begin(frame.text);
                } else {
                    view.fade.set(frame.text);
                }
            }
        }
    }

    fn reveal_view_mut(&mut self, slot: Slot) -> Option<&mut RevealView> {
        match slot {
            Slot::Logo => Some(&mut self.logo),
            Slot::Inline => Some(&mut self.inline),
            Slot::Button(i) => self.buttons.get_mut(i),
            Slot::Tagline | Slot::Accent => None,
        }
    }

    /// Restart the reveal mounted in `slot`
    pub fn trigger(&self, slot: Slot) {
        if let Some((_, handle)) = self.handles.iter().find(|(s, _)| *s == slot) {
            handle.trigger();
        }
    }

    pub fn select_next_button(&mut self) {
        if self.buttons.is_empty() {
            return;
        }
        self.selected_button = (self.selected_button + 1) % self.buttons.len();
        self.trigger(Slot::Button(self.selected_button));
    }

    pub fn select_prev_button(&mut self) {
        if self.buttons.is_empty() {
            return;
        }
        self.selected_button = self
            .selected_button
            .checked_sub(1)
            .unwrap_or(self.buttons.len() - 1);
        self.trigger(Slot::Button(self.selected_button));
    }

    pub fn activate_selected_button(&mut self) {
        if let Some(view) = self.buttons.get(self.selected_button) {
            self.status_message = Some(format!(" {} ", view.frame.text));
            self.trigger(Slot::Button(self.selected_button));
        }
    }

    pub fn toggle_cards(&mut self) {
        self.flap_cards = !self.flap_cards;
    }

    /// Advance crossfades; true while anything is mid-animation
    pub fn update(&mut self) -> bool {
        let tagline = self.tagline.fade.update();
        let accent = self.accent.fade.update();
        tagline
            || accent
            || self.logo.is_scrambling()
            || self.inline.is_scrambling()
            || self.buttons.iter().any(RevealView::is_scrambling)
    }
}

fn build_cycler(slot: Slot, preset: &CyclerPreset) -> Result<PeriodicCycler> {
    preset
        .to_cycler()
        .with_context(|| format!("invalid cycler preset for {:?}", slot))
}

/// Sink that tags frames for the UI channel; warns once if the UI is gone
fn update_sink<F>(
    tx: mpsc::UnboundedSender<EffectUpdate>,
    tag: impl Fn(&F) -> EffectUpdate + Send,
) -> impl FnMut(&F) + Send {
    let mut closed = false;
    move |frame: &F| {
        if tx.send(tag(frame)).is_err() && !closed {
            warn!("Failed to send effect update: receiver dropped");
            closed = true;
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.unmount();
    }
}
