//! eframe application shell: drains backend events into the state machine
//! and renders whatever view the controller says is visible. All user
//! interaction is expressed as [`AppEvent`]s; the render pass never
//! mutates navigation state directly.

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{AdminSnapshot, Rating};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::state::{AdminTab, AppEvent, AppState, Effect, Notice, NoticeKind, View};

pub struct FeedbackApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: AppState,
}

fn rating_label(rating: Rating) -> String {
    let stars = "\u{2B50}".repeat(rating.as_u8() as usize);
    format!("{stars} ({})", rating.describe())
}

fn show_notice_banner(notice: &Option<Notice>, ui: &mut egui::Ui, events: &mut Vec<AppEvent>) {
    let Some(notice) = notice else { return };
    let (fill, stroke) = match notice.kind {
        NoticeKind::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
        ),
        NoticeKind::Info => (
            egui::Color32::from_rgb(45, 94, 62),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(95, 158, 113)),
        ),
    };

    egui::Frame::NONE
        .fill(fill)
        .stroke(stroke)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(&notice.message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        events.push(AppEvent::DismissNotice);
                    }
                });
            });
        });
}

fn stat_card(ui: &mut egui::Ui, title: &str, value: &str) {
    egui::Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(title).small().weak());
            ui.label(egui::RichText::new(value).size(28.0).strong());
        });
}

fn show_dashboard(ui: &mut egui::Ui, snapshot: &AdminSnapshot) {
    ui.heading("Dashboard");
    ui.add_space(10.0);

    ui.columns(3, |cols| {
        stat_card(&mut cols[0], "TOTAL", &snapshot.stats.total.to_string());
        stat_card(&mut cols[1], "AVG RATING", &snapshot.stats.avg_rating.to_string());
        stat_card(&mut cols[2], "DOMINANT EMOTION", &snapshot.stats.dominant_emotion);
    });

    ui.add_space(16.0);
    ui.label(egui::RichText::new("Recent Feedback").strong());
    ui.add_space(4.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("recent_feedback")
            .num_columns(4)
            .striped(true)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                for header in ["User", "Comment", "Rating", "Sentiment"] {
                    ui.label(egui::RichText::new(header).small().weak());
                }
                ui.end_row();

                for review in &snapshot.reviews {
                    ui.label(egui::RichText::new(&review.username).strong());
                    ui.label(format!("\"{}\"", review.comment));
                    ui.label(format!("{} \u{2605}", review.rating));
                    ui.label(&review.sentiment);
                    ui.end_row();
                }
            });
    });
}

fn show_user_management(
    ui: &mut egui::Ui,
    snapshot: &AdminSnapshot,
    delete_in_flight: bool,
    events: &mut Vec<AppEvent>,
) {
    ui.heading("Settings");
    ui.add_space(10.0);
    ui.label(egui::RichText::new("Manage Users").strong());
    ui.add_space(4.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("manage_users")
            .num_columns(4)
            .striped(true)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                for header in ["ID", "User", "Email", "Action"] {
                    ui.label(egui::RichText::new(header).small().weak());
                }
                ui.end_row();

                for user in &snapshot.users {
                    ui.label(format!("#{}", user.id.0));
                    ui.label(egui::RichText::new(&user.username).strong());
                    ui.label(&user.email);
                    if ui
                        .add_enabled(!delete_in_flight, egui::Button::new("Delete"))
                        .clicked()
                    {
                        events.push(AppEvent::RequestDeleteUser(user.id));
                    }
                    ui.end_row();
                }
            });
    });
}

impl FeedbackApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: AppState::new(),
        }
    }

    fn handle(&mut self, event: AppEvent) {
        for effect in self.state.apply(event) {
            let Effect::Dispatch(cmd) = effect;
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.notice);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.handle(AppEvent::Backend(event));
        }
    }

    fn show_sign_in(&mut self, ctx: &egui::Context) {
        let mut events = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            ui.add_space((avail.y * 0.14).clamp(24.0, 120.0));
            ui.vertical_centered(|ui| {
                ui.set_width(avail.x.clamp(360.0, 440.0));
                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .corner_radius(14.0)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
                        ui.heading("Login Portal");
                        show_notice_banner(&self.state.notice, ui, &mut events);

                        let username = ui.add_sized(
                            [ui.available_width(), 34.0],
                            egui::TextEdit::singleline(&mut self.state.signin.username)
                                .id_salt("signin_username")
                                .hint_text("Username"),
                        );
                        let password = ui.add_sized(
                            [ui.available_width(), 34.0],
                            egui::TextEdit::singleline(&mut self.state.signin.password)
                                .id_salt("signin_password")
                                .hint_text("Password")
                                .password(true),
                        );
                        let enter = ctx.input(|i| i.key_pressed(egui::Key::Enter));
                        if enter && (username.has_focus() || password.has_focus()) {
                            events.push(AppEvent::SubmitSignIn);
                        }

                        let button = egui::Button::new(egui::RichText::new("Login").strong())
                            .min_size(egui::vec2(ui.available_width(), 40.0));
                        if ui.add_enabled(!self.state.auth_in_flight, button).clicked() {
                            events.push(AppEvent::SubmitSignIn);
                        }
                        if self.state.auth_in_flight {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.weak("Signing in...");
                            });
                        }

                        ui.separator();
                        if ui.link("Register").clicked() {
                            events.push(AppEvent::GoToSignUp);
                        }
                    });
            });
        });
        for event in events {
            self.handle(event);
        }
    }

    fn show_sign_up(&mut self, ctx: &egui::Context) {
        let mut events = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            ui.add_space((avail.y * 0.14).clamp(24.0, 120.0));
            ui.vertical_centered(|ui| {
                ui.set_width(avail.x.clamp(360.0, 440.0));
                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .corner_radius(14.0)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
                        ui.heading("Create Account");
                        show_notice_banner(&self.state.notice, ui, &mut events);

                        ui.add_sized(
                            [ui.available_width(), 34.0],
                            egui::TextEdit::singleline(&mut self.state.signup.username)
                                .id_salt("signup_username")
                                .hint_text("Username"),
                        );
                        ui.add_sized(
                            [ui.available_width(), 34.0],
                            egui::TextEdit::singleline(&mut self.state.signup.email)
                                .id_salt("signup_email")
                                .hint_text("Email"),
                        );
                        ui.add_sized(
                            [ui.available_width(), 34.0],
                            egui::TextEdit::singleline(&mut self.state.signup.password)
                                .id_salt("signup_password")
                                .hint_text("Password")
                                .password(true),
                        );

                        let button = egui::Button::new(egui::RichText::new("Register").strong())
                            .min_size(egui::vec2(ui.available_width(), 40.0));
                        if ui.add_enabled(!self.state.auth_in_flight, button).clicked() {
                            events.push(AppEvent::SubmitSignUp);
                        }
                        if self.state.auth_in_flight {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.weak("Creating account...");
                            });
                        }

                        ui.separator();
                        if ui.link("Back to Login").clicked() {
                            events.push(AppEvent::GoToSignIn);
                        }
                    });
            });
        });
        for event in events {
            self.handle(event);
        }
    }

    fn show_feedback(&mut self, ctx: &egui::Context) {
        let mut events = Vec::new();
        egui::TopBottomPanel::top("feedback_nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("AI FEEDBACK");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Logout").clicked() {
                        events.push(AppEvent::SignOut);
                    }
                    if let Some(session) = &self.state.session {
                        ui.weak(format!("Signed in as {}", session.username));
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            ui.add_space((avail.y * 0.08).clamp(12.0, 60.0));
            ui.vertical_centered(|ui| {
                ui.set_width(avail.x.clamp(420.0, 640.0));
                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .corner_radius(14.0)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
                        ui.heading("We value your opinion");
                        show_notice_banner(&self.state.notice, ui, &mut events);

                        ui.add(
                            egui::TextEdit::multiline(&mut self.state.feedback.comment)
                                .id_salt("feedback_comment")
                                .hint_text("Type here...")
                                .desired_rows(6)
                                .desired_width(f32::INFINITY),
                        );

                        ui.label(egui::RichText::new("Rate Us").strong());
                        egui::ComboBox::from_id_salt("feedback_rating")
                            .width(ui.available_width())
                            .selected_text(rating_label(self.state.feedback.rating))
                            .show_ui(ui, |ui| {
                                for rating in Rating::ALL {
                                    ui.selectable_value(
                                        &mut self.state.feedback.rating,
                                        rating,
                                        rating_label(rating),
                                    );
                                }
                            });

                        let button =
                            egui::Button::new(egui::RichText::new("Analyze & Submit").strong())
                                .min_size(egui::vec2(ui.available_width(), 40.0));
                        if ui
                            .add_enabled(!self.state.feedback_in_flight, button)
                            .clicked()
                        {
                            events.push(AppEvent::SubmitFeedback);
                        }
                        if self.state.feedback_in_flight {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.weak("Analyzing...");
                            });
                        }
                    });
            });
        });

        self.show_sentiment_modal(ctx, &mut events);
        for event in events {
            self.handle(event);
        }
    }

    fn show_sentiment_modal(&self, ctx: &egui::Context, events: &mut Vec<AppEvent>) {
        let Some(result) = &self.state.sentiment_modal else {
            return;
        };
        egui::Window::new("sentiment_result")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new(result.category().icon()).size(48.0));
                    ui.add_space(6.0);
                    ui.label(format!(
                        "Our AI detected your feedback expresses {}.",
                        result.label
                    ));
                    ui.add_space(10.0);
                    if ui.button("Close").clicked() {
                        events.push(AppEvent::DismissSentiment);
                    }
                    ui.add_space(8.0);
                });
            });
    }

    fn show_admin(&mut self, ctx: &egui::Context, tab: AdminTab) {
        // visible_view only routes here once a snapshot exists.
        let Some(snapshot) = self.state.admin_snapshot.clone() else {
            return;
        };
        let mut events = Vec::new();

        egui::SidePanel::left("admin_nav")
            .resizable(false)
            .exact_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("ADMIN PANEL");
                ui.add_space(12.0);
                if ui
                    .selectable_label(tab == AdminTab::Dashboard, "Dashboard")
                    .clicked()
                {
                    events.push(AppEvent::SelectAdminTab(AdminTab::Dashboard));
                }
                if ui
                    .selectable_label(tab == AdminTab::Settings, "Settings")
                    .clicked()
                {
                    events.push(AppEvent::SelectAdminTab(AdminTab::Settings));
                }
                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    ui.add_space(8.0);
                    if ui.button("Logout").clicked() {
                        events.push(AppEvent::SignOut);
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            show_notice_banner(&self.state.notice, ui, &mut events);
            match tab {
                AdminTab::Dashboard => show_dashboard(ui, &snapshot),
                AdminTab::Settings => show_user_management(
                    ui,
                    &snapshot,
                    self.state.admin_in_flight,
                    &mut events,
                ),
            }
        });

        self.show_delete_confirmation(ctx, &snapshot, &mut events);
        for event in events {
            self.handle(event);
        }
    }

    fn show_delete_confirmation(
        &self,
        ctx: &egui::Context,
        snapshot: &AdminSnapshot,
        events: &mut Vec<AppEvent>,
    ) {
        let Some(user_id) = self.state.pending_delete else {
            return;
        };
        let username = snapshot
            .users
            .iter()
            .find(|user| user.id == user_id)
            .map(|user| user.username.as_str())
            .unwrap_or("this user");

        egui::Window::new("confirm_delete")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(format!("Delete {username}?")).strong());
                ui.weak("The user list refreshes from the server after deletion.");
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        events.push(AppEvent::CancelPendingDelete);
                    }
                    let delete = egui::Button::new(
                        egui::RichText::new("Delete").color(egui::Color32::from_rgb(235, 100, 100)),
                    );
                    if ui.add(delete).clicked() {
                        events.push(AppEvent::ConfirmPendingDelete);
                    }
                });
                ui.add_space(6.0);
            });
    }

    fn show_loading(&mut self, ctx: &egui::Context) {
        let mut events = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.3);
                ui.set_width(ui.available_width().clamp(360.0, 440.0));
                if self.state.admin_in_flight {
                    ui.spinner();
                    ui.weak("Loading...");
                } else {
                    // The initial snapshot fetch failed; offer a way out.
                    show_notice_banner(&self.state.notice, ui, &mut events);
                    ui.add_space(4.0);
                    ui.weak("The dashboard could not be loaded.");
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Retry").clicked() {
                            events.push(AppEvent::RetryAdminFetch);
                        }
                        if ui.button("Logout").clicked() {
                            events.push(AppEvent::SignOut);
                        }
                    });
                }
            });
        });
        for event in events {
            self.handle(event);
        }
    }
}

impl eframe::App for FeedbackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        match self.state.visible_view() {
            View::SignIn => self.show_sign_in(ctx),
            View::SignUp => self.show_sign_up(ctx),
            View::Feedback => self.show_feedback(ctx),
            View::AdminDashboard => self.show_admin(ctx, AdminTab::Dashboard),
            View::AdminSettings => self.show_admin(ctx, AdminTab::Settings),
            View::Loading => self.show_loading(ctx),
        }

        // Backend events arrive while the UI is idle; keep polling.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
