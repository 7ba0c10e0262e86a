//! Searchable, sortable record list with per-row actions.

use client_core::{list::SortState, EntityScreen, Resource, SortField};
use eframe::egui;

pub enum TableAction<R: Resource> {
    Search(String),
    Sort(R::Sort),
    Edit(R::Id),
    Delete(R::Id),
    Refresh,
}

/// Button text for a sortable column, with an arrow on the active one.
pub fn sort_button_label<K: SortField>(field: K, sort: Option<SortState<K>>) -> String {
    match sort {
        Some(state) if state.field == field => {
            format!("{} {}", field.label(), state.direction.arrow())
        }
        _ => field.label().to_string(),
    }
}

pub fn show_table<R: Resource>(ui: &mut egui::Ui, screen: &EntityScreen<R>) -> Vec<TableAction<R>> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        let mut term = screen.search().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut term)
                .hint_text("Search")
                .desired_width(220.0),
        );
        if response.changed() {
            actions.push(TableAction::Search(term));
        }

        ui.separator();
        ui.label("Sort:");
        let sort = screen.sort();
        for &field in R::Sort::ALL {
            let active = sort.is_some_and(|s| s.field == field);
            if ui
                .selectable_label(active, sort_button_label(field, sort))
                .clicked()
            {
                actions.push(TableAction::Sort(field));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!screen.is_loading(), egui::Button::new("Refresh"))
                .clicked()
            {
                actions.push(TableAction::Refresh);
            }
            if screen.is_loading() {
                ui.spinner();
            }
        });
    });
    ui.separator();

    let visible = screen.visible();
    if visible.is_empty() {
        let text = if screen.items().is_empty() {
            format!("No {} yet.", R::KIND.collection())
        } else {
            "Nothing matches the search.".to_string()
        };
        ui.weak(text);
        return actions;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            egui::Grid::new((R::KIND.collection(), "table"))
                .striped(true)
                .num_columns(R::COLUMNS.len() + 1)
                .spacing([18.0, 6.0])
                .show(ui, |ui| {
                    for column in R::COLUMNS {
                        ui.strong(*column);
                    }
                    ui.label("");
                    ui.end_row();

                    for record in visible {
                        let highlighted = screen.editing() == Some(record.id());
                        for cell in screen.cells(record) {
                            if highlighted {
                                ui.label(egui::RichText::new(cell).strong());
                            } else {
                                ui.label(cell);
                            }
                        }
                        ui.horizontal(|ui| {
                            if ui.small_button("Edit").clicked() {
                                actions.push(TableAction::Edit(record.id().clone()));
                            }
                            if ui.small_button("Delete").clicked() {
                                actions.push(TableAction::Delete(record.id().clone()));
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    actions
}
