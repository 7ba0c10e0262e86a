use client_core::{EntityScreen, NoticeKind, Request, Resource};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{UiError, UiEvent},
        orchestration::dispatch_backend_command,
        screens::{ScreenRequest, Screens, Tab},
    },
    ui::{
        forms::{show_form, Choice, FormAction, FormLayout},
        table::{show_table, TableAction},
        theme,
    },
};

pub const TAB_STORAGE_KEY: &str = "hr_console.tab";

pub struct HrConsoleApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    screens: Screens,
    tab: Tab,
    base_url: String,
    status: String,
    status_banner: Option<UiError>,
}

impl HrConsoleApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        base_url: String,
        confirm_deletes: bool,
        tab: Tab,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            screens: Screens::new(confirm_deletes),
            tab,
            base_url,
            status: "Starting backend worker...".to_string(),
            status_banner: None,
        };
        app.switch_tab(tab);
        app
    }

    fn send(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status_banner);
    }

    fn switch_tab(&mut self, tab: Tab) {
        let (previous, request) = self.screens.switch_to(tab);
        if let Some(previous) = previous {
            self.send(BackendCommand::Unmount(previous));
        }
        self.tab = tab;
        self.send(BackendCommand::Execute(request));
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "{}", err.message());
                    self.status_banner = Some(err);
                }
                UiEvent::Outcome(outcome) => {
                    if !self.screens.is_current(&outcome) {
                        tracing::debug!(tab = ?outcome.tab(), "dropping stale outcome");
                        continue;
                    }
                    if let Some((action, err)) = outcome.failure() {
                        self.status_banner = Some(UiError::from_client_error(action.into(), err));
                    }
                    if let Some(follow_up) = self.screens.apply(outcome) {
                        self.send(BackendCommand::Execute(follow_up));
                    }
                }
            }
        }
    }

    fn show_tabs(&mut self, ctx: &egui::Context) {
        let mut selected = None;
        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("HR Console");
                ui.separator();
                for tab in Tab::ALL {
                    let clicked = ui.selectable_label(self.tab == tab, tab.label()).clicked();
                    if clicked && self.tab != tab {
                        selected = Some(tab);
                    }
                }
            });
        });
        if let Some(tab) = selected {
            self.switch_tab(tab);
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if let Some(banner) = self.status_banner.clone() {
                egui::Frame::group(ui.style())
                    .fill(theme::FAILURE_FILL)
                    .stroke(egui::Stroke::new(1.0, theme::FAILURE_STROKE))
                    .show(ui, |ui| {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(
                                egui::RichText::new(banner.summary()).color(egui::Color32::WHITE),
                            );
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
            }
            ui.horizontal(|ui| {
                ui.small(&self.status);
                ui.separator();
                ui.small(format!("API: {}", self.base_url));
            });
        });
    }

    fn show_active_screen(&mut self, ctx: &egui::Context) {
        let mut outbox = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Companies => show_screen(ui, &mut self.screens.companies, None, &mut outbox),
            Tab::Departments => show_screen(ui, &mut self.screens.departments, None, &mut outbox),
            Tab::Employees => {
                let departments: Vec<Choice> = self
                    .screens
                    .employees
                    .department_choices()
                    .into_iter()
                    .map(|d| (d.id.0.clone(), d.name.clone()))
                    .collect();
                show_screen(
                    ui,
                    &mut self.screens.employees,
                    Some(departments.as_slice()),
                    &mut outbox,
                );
            }
            Tab::Candidates => show_screen(ui, &mut self.screens.candidates, None, &mut outbox),
        });
        for request in outbox {
            self.send(BackendCommand::Execute(request));
        }
    }
}

fn show_notice<R: Resource>(ui: &mut egui::Ui, screen: &mut EntityScreen<R>) {
    let Some(notice) = screen.notice().cloned() else {
        return;
    };
    let (fill, stroke) = match notice.kind {
        NoticeKind::Success => (theme::SUCCESS_FILL, theme::SUCCESS_STROKE),
        NoticeKind::Failure => (theme::FAILURE_FILL, theme::FAILURE_STROKE),
    };
    egui::Frame::group(ui.style())
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, stroke))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&notice.message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("x").clicked() {
                        screen.dismiss_notice();
                    }
                });
            });
        });
    ui.add_space(6.0);
}

fn show_delete_confirmation<R: Resource>(
    ctx: &egui::Context,
    screen: &mut EntityScreen<R>,
    outbox: &mut Vec<ScreenRequest>,
) where
    ScreenRequest: From<Request<R>>,
{
    let Some(id) = screen.pending_delete().cloned() else {
        return;
    };
    let name = screen
        .items()
        .iter()
        .find(|item| *item.id() == id)
        .map_or_else(|| id.to_string(), |item| item.display_name());

    let mut confirmed = false;
    let mut cancelled = false;
    egui::Window::new(format!("Delete {}", R::KIND.singular()))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!(
                "Are you sure you want to delete \"{name}\"? This cannot be undone."
            ));
            ui.horizontal(|ui| {
                confirmed = ui.button("Delete").clicked();
                cancelled = ui.button("Cancel").clicked();
            });
        });

    if confirmed {
        if let Some(request) = screen.confirm_delete() {
            outbox.push(request.into());
        }
    } else if cancelled {
        screen.cancel_delete();
    }
}

fn show_screen<R>(
    ui: &mut egui::Ui,
    screen: &mut EntityScreen<R>,
    departments: Option<&[Choice]>,
    outbox: &mut Vec<ScreenRequest>,
) where
    R: Resource,
    R::Draft: FormLayout,
    ScreenRequest: From<Request<R>>,
{
    show_notice(ui, screen);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        match show_form(ui, screen, departments) {
            FormAction::Submit => {
                if let Some(request) = screen.submit() {
                    outbox.push(request.into());
                }
            }
            FormAction::Cancel => screen.cancel_edit(),
            FormAction::None => {}
        }
    });
    ui.add_space(8.0);

    for action in show_table(ui, screen) {
        match action {
            TableAction::Search(term) => screen.set_search(term),
            TableAction::Sort(field) => screen.sort_by(field),
            TableAction::Edit(id) => {
                screen.edit_id(&id);
            }
            TableAction::Delete(id) => {
                if let Some(request) = screen.request_delete(id) {
                    outbox.push(request.into());
                }
            }
            TableAction::Refresh => outbox.push(screen.load_all().into()),
        }
    }

    let ctx = ui.ctx().clone();
    show_delete_confirmation(&ctx, screen, outbox);
}

impl eframe::App for HrConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_tabs(ctx);
        self.show_status_bar(ctx);
        self.show_active_screen(ctx);

        let busy = self.screens.is_busy(self.tab);
        if busy {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(serialized) = serde_json::to_string(&self.tab) {
            storage.set_string(TAB_STORAGE_KEY, serialized);
        }
    }
}
