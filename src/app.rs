use std::path::PathBuf;

use eframe::{CreationContext, NativeOptions};
use egui_extras::{Column, TableBuilder};
use egui_graphs::{GraphView, SettingsInteraction, SettingsNavigation, SettingsStyle};
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::data::{Data, DataCollection};
use crate::hub::{Hub, MessageKind};
use crate::session::Session;
use crate::Result;

pub const APP_NAME: &str = "glue";
const DEFAULT_SESSION_FILE: &str = "session.glu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Table,
    Links,
}

pub struct GlueApplication {
    session: Session,
    session_path: Option<PathBuf>,
    selected: Option<usize>,
    view: View,
    links: Option<egui_graphs::Graph<String>>,
    status: Option<String>,
}

impl GlueApplication {
    pub fn new(
        _cc: &CreationContext,
        data_collection: Option<DataCollection>,
        hub: Option<Hub>,
        session_path: Option<PathBuf>,
    ) -> Self {
        Self::from_parts(
            data_collection.unwrap_or_default(),
            hub.unwrap_or_default(),
            session_path,
        )
    }

    pub fn from_parts(
        data_collection: DataCollection,
        hub: Hub,
        session_path: Option<PathBuf>,
    ) -> Self {
        let selected = (!data_collection.is_empty()).then_some(0);
        Self {
            session: Session::new(data_collection, hub),
            session_path,
            selected,
            view: View::Table,
            links: None,
            status: None,
        }
    }

    pub fn data_collection(&self) -> &DataCollection {
        &self.session.data
    }

    pub fn hub(&self) -> &Hub {
        &self.session.hub
    }

    /// Where *Save session* writes: the file the session came from, if any.
    pub fn save_target(&self) -> PathBuf {
        self.session_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE))
    }

    pub fn save_session(&mut self) -> Result<PathBuf> {
        let path = self.save_target();
        self.session.save(&path)?;
        self.session_path = Some(path.clone());
        Ok(path)
    }

    fn selected_data(&self) -> Option<&Data> {
        self.selected
            .and_then(|i| self.session.data.iter().nth(i))
    }

    /// Views subscribed to the selected dataset, for any message kind.
    fn linked_views(&self) -> Vec<&str> {
        let Some(data) = self.selected_data() else {
            return Vec::new();
        };
        let mut views = Vec::new();
        for kind in MessageKind::ALL {
            for subscriber in self.session.hub.subscribers_for(&data.label, kind) {
                if !views.contains(&subscriber) {
                    views.push(subscriber);
                }
            }
        }
        views
    }

    fn remove_view(&mut self, subscriber: &str) -> usize {
        let removed = self.session.hub.unsubscribe(subscriber);
        if removed > 0 {
            info!(subscriber, removed, "view unsubscribed");
            self.links = None;
            self.status = Some(format!("Removed view {subscriber}"));
        }
        removed
    }

    fn side_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Data");
        ui.separator();
        let mut selected = self.selected;
        for (i, data) in self.session.data.iter().enumerate() {
            if ui
                .selectable_label(selected == Some(i), data.label.as_str())
                .clicked()
            {
                selected = Some(i);
            }
        }
        self.selected = selected;

        ui.add_space(12.0);
        ui.heading("Views");
        ui.separator();
        let mut remove = None;
        for view in self.linked_views() {
            ui.horizontal(|ui| {
                ui.label(view);
                if ui.small_button("Remove").clicked() {
                    remove = Some(view.to_string());
                }
            });
        }
        if let Some(view) = remove {
            self.remove_view(&view);
        }
    }

    fn on_save(&mut self) {
        match self.save_session() {
            Ok(path) => {
                info!(path = %path.display(), "session saved");
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                error!("could not save session: {e}");
                self.status = Some(format!("Could not save session: {e}"));
            }
        }
    }

    fn table_ui(&self, ui: &mut egui::Ui) {
        let Some(data) = self.selected_data() else {
            ui.label("No data loaded");
            return;
        };

        ui.heading(format!("{} ({} rows)", data.label, data.size()));
        ui.separator();

        egui::ScrollArea::horizontal().show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto())
                .columns(Column::auto().at_least(60.0), data.components.len())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                    for component in &data.components {
                        header.col(|ui| {
                            ui.strong(component.label.as_str());
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, data.size(), |mut row| {
                        let i = row.index();
                        row.col(|ui| {
                            ui.label(i.to_string());
                        });
                        for component in &data.components {
                            row.col(|ui| {
                                if let Some(value) = component.values.get(i) {
                                    ui.label(value.to_string());
                                }
                            });
                        }
                    });
                });
        });
    }

    fn links_ui(&mut self, ui: &mut egui::Ui) {
        if self.session.hub.is_empty() && self.session.data.is_empty() {
            ui.label("No links to display");
            return;
        }

        let graph = self
            .links
            .get_or_insert_with(|| build_links(&self.session));
        ui.add(
            &mut GraphView::<String>::new(graph)
                .with_styles(&SettingsStyle::new().with_labels_always(true))
                .with_interactions(&SettingsInteraction::new().with_dragging_enabled(true))
                .with_navigations(
                    &SettingsNavigation::new()
                        .with_zoom_and_pan_enabled(true)
                        .with_fit_to_screen_enabled(true),
                ),
        );
    }

    fn status_text(&self) -> String {
        let mut text = format!(
            "{} datasets, {} subscriptions",
            self.session.data.len(),
            self.session.hub.subscriptions().len()
        );
        if let Some(path) = &self.session_path {
            text.push_str(&format!("  |  {}", path.display()));
        }
        if let Some(status) = &self.status {
            text.push_str(&format!("  |  {status}"));
        }
        text
    }
}

fn build_links(session: &Session) -> egui_graphs::Graph<String> {
    let links = session.hub.link_graph(&session.data);
    let mut graph: egui_graphs::Graph<String> = egui_graphs::Graph::from(&links);
    for idx in links.node_indices() {
        if let Some(node) = graph.node_mut(idx) {
            node.set_label(links[idx].clone());
        }
    }
    graph
}

impl eframe::App for GlueApplication {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Save session").clicked() {
                        self.on_save();
                        ui.close_menu();
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.separator();
                ui.selectable_value(&mut self.view, View::Table, "Data");
                ui.selectable_value(&mut self.view, View::Links, "Links");
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status_text());
        });

        egui::SidePanel::left("data_collection").show(ctx, |ui| self.side_ui(ui));

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Table => self.table_ui(ui),
            View::Links => self.links_ui(ui),
        });
    }
}

/// Opens the main window and blocks until it is closed.
pub fn run_application(
    session: Option<Session>,
    session_path: Option<PathBuf>,
    settings: &Settings,
) -> i32 {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.title.clone())
            .with_inner_size([settings.window.width, settings.window.height]),
        ..Default::default()
    };
    let (data_collection, hub) = match session {
        Some(session) => {
            let (data, hub) = session.into_parts();
            (Some(data), Some(hub))
        }
        None => (None, None),
    };

    let result = eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            Ok(Box::new(GlueApplication::new(
                cc,
                data_collection,
                hub,
                session_path,
            )))
        }),
    );

    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("event loop failed: {e}");
            eprintln!("Could not start {APP_NAME}: {e}");
            1
        }
    }
}

struct ErrorDialog {
    message: String,
}

impl eframe::App for ErrorDialog {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.label(self.message.as_str());
                ui.add_space(12.0);
                if ui.button("OK").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }
}

/// Shows `message` in a small window. Always echoed to stderr as well, since
/// there may be no display to show it on.
pub fn show_error_dialog(title: &str, message: &str) {
    eprintln!("{title}: {message}");

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([420.0, 140.0])
            .with_resizable(false),
        ..Default::default()
    };
    let dialog = ErrorDialog {
        message: message.to_string(),
    };
    if let Err(e) = eframe::run_native(title, options, Box::new(|_cc| Ok(Box::new(dialog)))) {
        warn!("could not show error dialog: {e}");
    }
}
