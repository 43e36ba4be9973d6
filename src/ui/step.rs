//! Step viewer

use super::{status_label, wrapped};
use crate::app::step::StepView;
use crate::learning::{FormatFilter, RenderedResource};

/// Render a step and the resources its filter lets through
pub fn render(view: &StepView, width: usize) -> String {
    let step = &view.step;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("{}. {}", step.step_order, step.title));
    lines.push(format!(
        "{} · {} · {} min",
        status_label(step.status),
        step.difficulty,
        step.estimated_minutes
    ));
    if let Some(description) = &step.description {
        lines.push(String::new());
        lines.extend(wrapped(description, width, ""));
    }

    let rendered = view.rendered();
    lines.push(String::new());
    if rendered.is_empty() {
        lines.push(format!("No {} for this step yet", filter_noun(view.filter)));
    }
    for resource in &rendered {
        lines.extend(resource_lines(resource, width));
        lines.push(String::new());
    }

    if view.can_mark_done() {
        lines.push(format!("Mark as done: pathwise step complete {}", step.id));
    }

    lines.join("\n").trim_end().to_string()
}

fn resource_lines(resource: &RenderedResource<'_>, width: usize) -> Vec<String> {
    match resource {
        RenderedResource::Prose { title, body } => {
            let mut lines = vec![format!("## {}", title)];
            for paragraph in body.split("\n\n") {
                lines.extend(wrapped(paragraph.trim(), width, ""));
                lines.push(String::new());
            }
            lines.pop();
            lines
        }
        RenderedResource::Image { alt, src } => {
            vec![format!("[image] {}", alt), format!("  {}", src)]
        }
        RenderedResource::VideoSearch { query, channel, url } => {
            let heading = match channel {
                Some(channel) => format!("[video] {} ({})", query, channel),
                None => format!("[video] {}", query),
            };
            vec![heading, format!("  {}", url)]
        }
        RenderedResource::Reference { title, url } => {
            vec![format!("[reference] {}", title), format!("  {}", url)]
        }
        RenderedResource::Practice { title, url } => {
            vec![format!("[practice] {}", title), format!("  {}", url)]
        }
    }
}

fn filter_noun(filter: FormatFilter) -> &'static str {
    match filter {
        FormatFilter::Images => "images",
        FormatFilter::Videos => "videos",
        FormatFilter::Text => "reading",
        FormatFilter::Mixed => "resources",
    }
}
