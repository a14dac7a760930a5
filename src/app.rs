use crossbeam_channel::{Receiver, Sender, TrySendError};
use eframe::egui;
use indexmap::IndexMap;
use strum::IntoEnumIterator;

use crate::models::{BroadcastRequest, Guild, GuildStats, TargetGroup};
use crate::worker::{Command, Event};

/// Severity of the status line under the send button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    fn info(text: impl Into<String>) -> Self {
        StatusLine {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    fn success(text: impl Into<String>) -> Self {
        StatusLine {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        StatusLine {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// The whole UI session. State lives only for the process lifetime; nothing
/// is persisted.
pub struct DashboardApp {
    cmd_tx: Sender<Command>,
    event_rx: Receiver<Event>,
    /// Guilds keyed by id, in the order the backend returned them.
    guilds: IndexMap<u64, Guild>,
    selected_guild: Option<u64>,
    stats: Option<GuildStats>,
    /// Bumped on every guild selection; stats responses carrying an older
    /// generation are discarded.
    stats_generation: u64,
    target_group: TargetGroup,
    message: String,
    sending: bool,
    status: Option<StatusLine>,
}

impl DashboardApp {
    pub fn new(cmd_tx: Sender<Command>, event_rx: Receiver<Event>) -> Self {
        let mut app = DashboardApp {
            cmd_tx,
            event_rx,
            guilds: IndexMap::new(),
            selected_guild: None,
            stats: None,
            stats_generation: 0,
            target_group: TargetGroup::default(),
            message: String::new(),
            sending: false,
            status: None,
        };

        app.queue(Command::FetchGuilds);
        app
    }

    fn queue(&mut self, cmd: Command) -> bool {
        match self.cmd_tx.try_send(cmd) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.status = Some(StatusLine::error("Too many pending requests, please retry"));
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                self.status = Some(StatusLine::error("Background worker is not running"));
                false
            }
        }
    }

    fn select_guild(&mut self, guild_id: u64) {
        if self.selected_guild == Some(guild_id) {
            return;
        }
        self.selected_guild = Some(guild_id);
        self.refresh_stats();
    }

    /// Ask the worker for fresh presence stats for the current selection.
    /// The request carries a generation captured at dispatch time so a slow
    /// response for a previously selected guild cannot overwrite newer data.
    fn refresh_stats(&mut self) {
        let Some(guild_id) = self.selected_guild else {
            return;
        };
        self.stats_generation += 1;
        self.queue(Command::FetchStats {
            guild_id,
            generation: self.stats_generation,
        });
    }

    fn refresh_guilds(&mut self) {
        self.queue(Command::FetchGuilds);
    }

    fn submit(&mut self) {
        if self.sending {
            return;
        }
        if self.message.trim().is_empty() {
            self.status = Some(StatusLine::error("Please enter a message"));
            return;
        }
        let Some(guild_id) = self.selected_guild else {
            self.status = Some(StatusLine::error("Please select a server"));
            return;
        };

        let request = BroadcastRequest {
            guild_id,
            target_group: self.target_group,
            message: self.message.clone(),
        };

        if self.queue(Command::SendBroadcast(request)) {
            self.sending = true;
            self.status = Some(StatusLine::info("Sending messages..."));
        }
    }

    fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::GuildsLoaded(guilds) => {
                self.guilds = guilds.into_iter().map(|g| (g.id, g)).collect();
                match self.selected_guild {
                    Some(id) if self.guilds.contains_key(&id) => {}
                    _ => {
                        self.selected_guild = None;
                        self.stats = None;
                        if let Some(&first) = self.guilds.keys().next() {
                            self.select_guild(first);
                        }
                    }
                }
            }
            Event::GuildsFailed(reason) => {
                self.status = Some(StatusLine::error(format!(
                    "Failed to fetch the server list: {}",
                    reason
                )));
            }
            Event::StatsLoaded {
                guild_id,
                generation,
                stats,
            } => {
                if generation == self.stats_generation && self.selected_guild == Some(guild_id) {
                    self.stats = Some(stats);
                }
            }
            Event::BroadcastSent => {
                self.sending = false;
                self.message.clear();
                self.status = Some(StatusLine::success("Messages sent successfully"));
            }
            Event::BroadcastFailed(reason) => {
                self.sending = false;
                self.status = Some(StatusLine::error(reason));
            }
        }
    }

    fn guild_label(&self, guild_id: u64) -> Option<String> {
        self.guilds
            .get(&guild_id)
            .map(|g| format!("{} ({} members)", g.name, g.member_count))
    }

    fn show_stats(&self, ui: &mut egui::Ui) {
        let Some(stats) = &self.stats else {
            ui.weak("Presence stats will appear once a server is selected.");
            return;
        };

        ui.columns(3, |columns| {
            stat_card(&mut columns[0], "Total members", stats.total_members);
            stat_card(&mut columns[1], "Online", stats.online_members);
            stat_card(&mut columns[2], "Offline", stats.offline_members);
        });
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        let selected_label = self
            .selected_guild
            .and_then(|id| self.guild_label(id))
            .unwrap_or_else(|| "Select a server".to_string());

        // Selection is applied after the combo closure to keep the borrow on
        // `self.guilds` short.
        let mut clicked_guild = None;
        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Server")
                .selected_text(selected_label)
                .show_ui(ui, |ui| {
                    for guild in self.guilds.values() {
                        let selected = self.selected_guild == Some(guild.id);
                        let label = format!("{} ({} members)", guild.name, guild.member_count);
                        if ui.selectable_label(selected, label).clicked() {
                            clicked_guild = Some(guild.id);
                        }
                    }
                });
            if ui.button("Refresh").clicked() {
                self.refresh_guilds();
            }
        });
        if let Some(guild_id) = clicked_guild {
            self.select_guild(guild_id);
        }

        egui::ComboBox::from_label("Target group")
            .selected_text(self.target_group.label())
            .show_ui(ui, |ui| {
                for group in TargetGroup::iter() {
                    ui.selectable_value(&mut self.target_group, group, group.label());
                }
            });

        ui.add_space(8.0);
        ui.label("Message");
        ui.add(
            egui::TextEdit::multiline(&mut self.message)
                .hint_text("Write your message here...")
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );

        ui.add_space(8.0);
        let can_send = !self.sending && !self.message.trim().is_empty();
        let button_label = if self.sending {
            "Sending..."
        } else {
            "Send messages"
        };
        if ui
            .add_enabled(can_send, egui::Button::new(button_label))
            .clicked()
        {
            self.submit();
        }

        if let Some(status) = &self.status {
            ui.add_space(8.0);
            let color = match status.kind {
                StatusKind::Info => ui.visuals().text_color(),
                StatusKind::Success => egui::Color32::from_rgb(46, 160, 67),
                StatusKind::Error => egui::Color32::from_rgb(220, 53, 69),
            };
            ui.colored_label(color, &status.text);
        }
    }
}

fn stat_card(ui: &mut egui::Ui, title: &str, value: u64) {
    ui.vertical_centered(|ui| {
        ui.label(title);
        ui.heading(value.to_string());
    });
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Broadcast Dashboard");
            ui.weak("Send a message to the members of a Discord server.");
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(2.0);
            ui.weak("Make sure the bot has the Members and Presence intents enabled.");
            ui.add_space(2.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_stats(ui);
            ui.separator();
            self.show_controls(ui);
        });

        // Worker events arrive off-frame; keep repainting so they are drained
        // promptly.
        ctx.request_repaint();
    }
}
