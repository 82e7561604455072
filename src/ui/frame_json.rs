use crate::terminal::TerminalSize;
use crate::ui::renderer::RenderFrame;
use crate::ui::style::Color;
use crate::widgets::traits::HitTarget;

pub fn frame_to_json(frame: &RenderFrame, size: TerminalSize) -> serde_json::Value {
    let lines = frame
        .lines
        .iter()
        .map(|line| {
            serde_json::Value::Array(
                line.iter()
                    .map(|span| {
                        serde_json::json!({
                            "text": span.text,
                            "style": {
                                "color": span.style.color.map(color_to_json),
                                "background": span.style.background.map(color_to_json),
                                "bold": span.style.bold,
                            }
                        })
                    })
                    .collect(),
            )
        })
        .collect::<Vec<_>>();

    let hits = frame
        .hits
        .iter()
        .map(|hit| {
            serde_json::json!({
                "row": hit.row,
                "col_start": hit.cols.start,
                "col_end": hit.cols.end,
                "target": target_to_json(hit.target),
            })
        })
        .collect::<Vec<_>>();

    serde_json::json!({
        "terminal": {
            "width": size.width,
            "height": size.height,
        },
        "focus_row": frame.focus_row,
        "lines": lines,
        "hits": hits,
    })
}

fn target_to_json(target: HitTarget) -> serde_json::Value {
    match target {
        HitTarget::PrevMonth => serde_json::json!("prev_month"),
        HitTarget::NextMonth => serde_json::json!("next_month"),
        HitTarget::Day(date) => serde_json::json!({ "day": date.key().as_str() }),
    }
}

fn color_to_json(color: Color) -> serde_json::Value {
    match color {
        Color::Reset => serde_json::json!("reset"),
        Color::Black => serde_json::json!("black"),
        Color::DarkGrey => serde_json::json!("dark_grey"),
        Color::Red => serde_json::json!("red"),
        Color::Green => serde_json::json!("green"),
        Color::Yellow => serde_json::json!("yellow"),
        Color::Blue => serde_json::json!("blue"),
        Color::Magenta => serde_json::json!("magenta"),
        Color::Cyan => serde_json::json!("cyan"),
        Color::White => serde_json::json!("white"),
    }
}
