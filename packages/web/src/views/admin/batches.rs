use api::{midnight, validate_batch, Batch, NewBatch, Program};
use dioxus::prelude::*;
use ui::components::{Badge, Button, ButtonVariant, ErrorBanner, FormField, Input, PageHeader, Spinner};
use ui::icons::{FaPen, FaPlus, FaTrash};
use ui::{platform, report_error, use_api, use_auth, Icon, ModalOverlay};

use super::run_action;

fn program_name(programs: &[Program], id: i64) -> String {
    programs
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// The batch form as typed; dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq)]
struct BatchForm {
    name: String,
    program_id: Option<i64>,
    start_day: String,
    end_day: String,
}

impl BatchForm {
    fn from_batch(batch: &Batch) -> Self {
        Self {
            name: batch.name.clone(),
            program_id: Some(batch.program_id),
            start_day: batch.start_day().to_string(),
            end_day: batch.end_day().unwrap_or_default().to_string(),
        }
    }

    fn to_request(&self) -> Result<NewBatch, String> {
        validate_batch(&self.name, self.program_id, &self.start_day, &self.end_day)
            .map_err(|e| e.to_string())?;
        let end = self.end_day.trim();
        Ok(NewBatch {
            name: self.name.trim().to_string(),
            program_id: self.program_id.unwrap_or_default(),
            start_date: midnight(self.start_day.trim()),
            end_date: (!end.is_empty()).then(|| midnight(end)),
        })
    }
}

#[component]
pub fn AdminBatches() -> Element {
    let auth = use_auth();
    let api = use_api();
    let mut program_filter = use_signal(|| None::<i64>);
    let mut search = use_signal(String::new);
    // None: closed, Some(None): new batch, Some(Some(b)): editing b
    let mut editor = use_signal(|| None::<Option<Batch>>);
    let error = use_signal(|| None::<String>);

    let programs = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                api.programs().await.unwrap_or_else(|e| {
                    tracing::warn!("Failed to load programs: {}", e);
                    Vec::new()
                })
            }
        }
    });

    let mut batches = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let program = program_filter();
            async move { api.admin_batches(program).await.map_err(|e| report_error(auth, &e)) }
        }
    });

    let toggle = {
        let api = api.clone();
        move |batch: Batch| {
            let verb = if batch.is_active { "Deactivate" } else { "Activate" };
            if !platform::confirm(&format!("{} batch \"{}\"?", verb, batch.name)) {
                return;
            }
            let api = api.clone();
            run_action(auth, error, batches, async move { api.toggle_batch_active(batch.id).await });
        }
    };

    let delete = move |batch: Batch| {
        if !platform::confirm(&format!(
            "Delete batch \"{}\"? Students must be removed from it first.",
            batch.name
        )) {
            return;
        }
        let api = api.clone();
        run_action(auth, error, batches, async move { api.delete_batch(batch.id).await });
    };

    let program_list = programs.read().clone().unwrap_or_default();

    let body = match &*batches.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(all)) => {
            let needle = search();
            let visible: Vec<(Batch, String)> = all
                .iter()
                .map(|b| (b.clone(), program_name(&program_list, b.program_id)))
                .filter(|(b, program)| b.matches(&needle, program))
                .collect();
            rsx! {
                if visible.is_empty() {
                    div { class: "card empty-state", p { "No batches match." } }
                } else {
                    table {
                        class: "table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Program" }
                                th { "Start" }
                                th { "End" }
                                th { "Status" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            for (batch, program) in visible {
                                BatchRow {
                                    key: "{batch.id}",
                                    batch,
                                    program,
                                    on_edit: move |b: Batch| editor.set(Some(Some(b))),
                                    on_toggle: toggle.clone(),
                                    on_delete: delete.clone(),
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page",
            PageHeader {
                title: "Batch Management",
                subtitle: "Program intakes and their dates",
                actions: rsx! {
                    Button {
                        onclick: move |_| editor.set(Some(None)),
                        Icon { icon: FaPlus, width: 14, height: 14 }
                        " Add Batch"
                    }
                },
            }
            div {
                class: "toolbar",
                input {
                    class: "form-input search-input",
                    placeholder: "Search batches or programs",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
                select {
                    class: "form-input",
                    onchange: move |evt| program_filter.set(evt.value().parse().ok()),
                    option { value: "", "All programs" }
                    for program in program_list.iter() {
                        option { key: "{program.id}", value: "{program.id}", "{program.name}" }
                    }
                }
            }
            ErrorBanner { message: error() }
            {body}
            if let Some(target) = editor() {
                BatchFormModal {
                    batch: target,
                    programs: program_list.clone(),
                    on_close: move |_| editor.set(None),
                    on_saved: move |saved: Batch| {
                        tracing::info!("Saved batch {}", saved.id);
                        editor.set(None);
                        batches.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn BatchRow(
    batch: Batch,
    program: String,
    on_edit: EventHandler<Batch>,
    on_toggle: EventHandler<Batch>,
    on_delete: EventHandler<Batch>,
) -> Element {
    let status_class = if batch.is_active { "badge badge-success" } else { "badge badge-muted" };
    let status_label = if batch.is_active { "Active" } else { "Inactive" };
    let toggle_label = if batch.is_active { "Deactivate" } else { "Activate" };
    let end = batch.end_day().unwrap_or("Ongoing").to_string();
    let (edited, toggled, deleted) = (batch.clone(), batch.clone(), batch.clone());

    rsx! {
        tr {
            td { "{batch.name}" }
            td { class: "text-muted", "{program}" }
            td { "{batch.start_day()}" }
            td { "{end}" }
            td { Badge { class: status_class, label: status_label } }
            td {
                div {
                    class: "row",
                    Button {
                        variant: ButtonVariant::Ghost,
                        title: "Edit",
                        onclick: move |_| on_edit.call(edited.clone()),
                        Icon { icon: FaPen, width: 12, height: 12 }
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_toggle.call(toggled.clone()),
                        "{toggle_label}"
                    }
                    Button {
                        variant: ButtonVariant::Danger,
                        title: "Delete",
                        onclick: move |_| on_delete.call(deleted.clone()),
                        Icon { icon: FaTrash, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}

#[component]
fn BatchFormModal(
    batch: Option<Batch>,
    programs: Vec<Program>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<Batch>,
) -> Element {
    let auth = use_auth();
    let api = use_api();
    let editing_id = batch.as_ref().map(|b| b.id);
    let start = batch.as_ref().map(BatchForm::from_batch).unwrap_or_default();
    let mut form = use_signal(move || start);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let handle_save = move |_| {
        let draft = form.read().clone();
        let body = match draft.to_request() {
            Ok(body) => body,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        let api = api.clone();
        saving.set(true);
        error.set(None);
        spawn(async move {
            let result = match editing_id {
                Some(id) => api.update_batch(id, &body).await,
                None => api.create_batch(&body).await,
            };
            saving.set(false);
            match result {
                Ok(saved) => on_saved.call(saved),
                Err(e) => error.set(Some(report_error(auth, &e))),
            }
        });
    };

    let modal_title = if editing_id.is_some() { "Edit Batch" } else { "Create Batch" };
    let current = form();

    rsx! {
        ModalOverlay {
            title: modal_title,
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                ErrorBanner { message: error() }
                FormField {
                    label: "Batch Name",
                    html_for: "batch-name",
                    Input {
                        id: "batch-name",
                        placeholder: "Fall 2024",
                        value: current.name.clone(),
                        oninput: move |evt: FormEvent| form.write().name = evt.value(),
                    }
                }
                FormField {
                    label: "Program",
                    html_for: "batch-program",
                    select {
                        id: "batch-program",
                        class: "form-input",
                        onchange: move |evt: FormEvent| form.write().program_id = evt.value().parse().ok(),
                        option { value: "", selected: current.program_id.is_none(), "Select a program" }
                        for program in programs {
                            option {
                                key: "{program.id}",
                                value: "{program.id}",
                                selected: current.program_id == Some(program.id),
                                "{program.name}"
                            }
                        }
                    }
                }
                div {
                    class: "form-row",
                    FormField {
                        label: "Start Date",
                        html_for: "batch-start",
                        Input {
                            id: "batch-start",
                            r#type: "date",
                            value: current.start_day.clone(),
                            oninput: move |evt: FormEvent| form.write().start_day = evt.value(),
                        }
                    }
                    FormField {
                        label: "End Date",
                        html_for: "batch-end",
                        Input {
                            id: "batch-end",
                            r#type: "date",
                            value: current.end_day.clone(),
                            oninput: move |evt: FormEvent| form.write().end_day = evt.value(),
                        }
                    }
                }
            }
            div {
                class: "modal-footer",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: saving(),
                    onclick: handle_save,
                    if saving() { "Saving..." } else { "Save Batch" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Batch {
        Batch {
            id: 3,
            name: "Fall 2024".into(),
            program_id: 2,
            start_date: "2024-09-01T00:00:00".into(),
            end_date: Some("2028-06-30T00:00:00".into()),
            is_active: true,
        }
    }

    #[test]
    fn test_form_round_trips_batch_dates() {
        let form = BatchForm::from_batch(&batch());
        assert_eq!(form.start_day, "2024-09-01");
        let body = form.to_request().unwrap();
        assert_eq!(body.start_date, "2024-09-01T00:00:00");
        assert_eq!(body.end_date.as_deref(), Some("2028-06-30T00:00:00"));
        assert_eq!(body.program_id, 2);
    }

    #[test]
    fn test_open_ended_batch() {
        let form = BatchForm {
            name: " Spring ".into(),
            program_id: Some(1),
            start_day: "2025-01-10".into(),
            end_day: String::new(),
        };
        let body = form.to_request().unwrap();
        assert_eq!(body.name, "Spring");
        assert_eq!(body.end_date, None);

        let missing_program = BatchForm { program_id: None, ..form };
        assert_eq!(
            missing_program.to_request(),
            Err("Please select a program".to_string())
        );
    }

    #[test]
    fn test_program_name_fallback() {
        let programs = vec![Program {
            id: 2,
            name: "Computer Science".into(),
            code: None,
            department_id: None,
        }];
        assert_eq!(program_name(&programs, 2), "Computer Science");
        assert_eq!(program_name(&programs, 9), "Unknown");
    }
}
