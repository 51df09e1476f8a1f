use eframe::egui::{self, Ui};

use crate::util::{format_count, short_date};

use super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.add_space(6.0);
        ui.heading("Repository");

        let selected = self.selected.as_deref().and_then(|id| {
            self.profile
                .repos
                .iter()
                .find(|repo| repo.name == id)
                .cloned()
        });

        match selected {
            Some(repo) => {
                ui.strong(repo.name.as_str());
                ui.label(format!(
                    "language: {}",
                    repo.language.as_deref().unwrap_or("Other")
                ));
                ui.label(format!(
                    "\u{2605} {}   forks {}",
                    format_count(repo.stargazers),
                    format_count(repo.forks)
                ));
                if let Some(pushed) = &repo.pushed_at {
                    ui.label(format!("last push: {}", short_date(pushed)));
                }
                if repo.fork {
                    ui.label("fork of another repository");
                }
                if let Some(description) = &repo.description {
                    ui.add_space(4.0);
                    ui.label(description);
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if !repo.html_url.is_empty() && ui.button("Open on GitHub").clicked() {
                        ui.ctx().open_url(egui::OpenUrl::new_tab(&repo.html_url));
                    }
                    if ui.button("Deselect").clicked() {
                        self.selected = None;
                    }
                });
            }
            None => {
                ui.label("Click a node to inspect its repository.");
            }
        }

        ui.separator();
        ui.heading("Top starred");

        let mut pending = None;
        for repo in &self.top_starred {
            let marked = self.selected.as_deref() == Some(repo.name.as_str());
            let row = ui.selectable_label(
                marked,
                format!("{}  \u{2605} {}", repo.name, format_count(repo.stargazers)),
            );
            if row.clicked() {
                pending = Some(repo.name.clone());
            }
        }
        if let Some(name) = pending {
            self.selected = Some(name);
        }
    }
}
