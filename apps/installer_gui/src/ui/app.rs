use std::{cell::RefCell, rc::Rc, time::Duration};

use anyhow::anyhow;
use crossbeam_channel::Receiver;
use eframe::egui;
use ux_core::{process_message, InstallerModel, LoopMessage, ModelProperty, SubscriptionId, WindowHost};

use crate::controller::{
    events::{describe_change, status_line, UiAction},
    orchestration::dispatch_ui_action,
};

const ACTIVITY_LIMIT: usize = 200;

/// Runs the installer window with eframe; the window borrows the model for as
/// long as it is open.
pub struct EguiWindowHost {
    title: String,
}

impl EguiWindowHost {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl WindowHost for EguiWindowHost {
    fn run(&mut self, model: &mut InstallerModel, inbox: &Receiver<LoopMessage>) -> anyhow::Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.title.clone())
                .with_inner_size([520.0, 380.0])
                .with_min_inner_size([420.0, 300.0]),
            ..Default::default()
        };
        tracing::info!(title = %self.title, "opening installer window");
        eframe::run_native(
            &self.title,
            options,
            Box::new(move |cc| Ok(Box::new(InstallerWindow::new(&cc.egui_ctx, model, inbox)))),
        )
        .map_err(|err| anyhow!("installer window failed: {err}"))
    }
}

struct InstallerWindow<'m> {
    model: &'m mut InstallerModel,
    inbox: &'m Receiver<LoopMessage>,
    subscription: SubscriptionId,
    changes: Rc<RefCell<Vec<ModelProperty>>>,
    activity: Vec<String>,
    status: String,
    close_sent: bool,
}

impl<'m> InstallerWindow<'m> {
    fn new(
        ctx: &egui::Context,
        model: &'m mut InstallerModel,
        inbox: &'m Receiver<LoopMessage>,
    ) -> Self {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let repaint = ctx.clone();
        let subscription = model.subscribe(move |changed| {
            sink.borrow_mut().push(changed.property);
            repaint.request_repaint();
        });

        Self {
            model,
            inbox,
            subscription,
            changes,
            activity: Vec::new(),
            status: String::new(),
            close_sent: false,
        }
    }

    fn process_inbox(&mut self) {
        while let Ok(message) = self.inbox.try_recv() {
            process_message(self.model, message);
        }

        let changed = std::mem::take(&mut *self.changes.borrow_mut());
        for property in changed {
            if let Some(line) = describe_change(property, self.model) {
                self.push_activity(line);
            }
        }
    }

    fn push_activity(&mut self, line: String) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.activity.push(format!("[{stamp}] {line}"));
        if self.activity.len() > ACTIVITY_LIMIT {
            let overflow = self.activity.len() - ACTIVITY_LIMIT;
            self.activity.drain(..overflow);
        }
    }

    fn show_packages(&self, ui: &mut egui::Ui) {
        egui::Grid::new("packages")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.strong("Package");
                ui.strong("State");
                ui.end_row();
                for package in self.model.detected_packages() {
                    ui.label(package.package_id.to_string());
                    ui.label(package.state.label());
                    ui.end_row();
                }
            });
    }

    fn show_actions(&self, ui: &mut egui::Ui) -> Option<UiAction> {
        let mut clicked = None;
        ui.horizontal(|ui| {
            for (action, label) in [
                (UiAction::Install, "Install"),
                (UiAction::Uninstall, "Uninstall"),
                (UiAction::Apply, "Apply"),
                (UiAction::Exit, "Exit"),
            ] {
                if action == UiAction::Apply && !self.model.apply_available() {
                    continue;
                }
                let enabled = action.is_enabled(self.model);
                if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
                    clicked = Some(action);
                }
            }
            if self.model.busy() {
                ui.spinner();
            }
        });
        clicked
    }
}

impl eframe::App for InstallerWindow<'_> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_inbox();

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if self.status.is_empty() {
                ui.label(status_line(self.model));
            } else {
                let color = ui.visuals().error_fg_color;
                ui.colored_label(color, &self.status);
            }
        });

        let mut clicked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Installation");
            ui.add_space(6.0);
            self.show_packages(ui);
            ui.add_space(8.0);
            clicked = self.show_actions(ui);
            ui.separator();
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.activity {
                        ui.monospace(line);
                    }
                });
        });

        if let Some(action) = clicked {
            dispatch_ui_action(self.model, action, &mut self.status);
        }

        if self.model.exit_requested() && !self.close_sent {
            self.close_sent = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

impl Drop for InstallerWindow<'_> {
    fn drop(&mut self) {
        self.model.unsubscribe(self.subscription);
    }
}
