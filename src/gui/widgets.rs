//! Renders control bindings as iced widgets.

use iced::widget::{radio, row, slider, text, toggler};
use iced::{Alignment, Element, Length};

use crate::binding::ControlBinding;
use crate::event::Change;
use crate::gui::message::Message;
use crate::widget::Widget;

const CAPTION_WIDTH: f32 = 200.0;

/// One control: caption before the interactive element, except toggles which
/// carry the name as their own label.
pub fn control_row<'a>(tab: usize, binding: &'a ControlBinding) -> Element<'a, Message> {
    let control = binding.control().id();
    let changed = move |change: Change| Message::Changed {
        tab,
        control,
        change,
    };

    let input: Element<'a, Message> = match binding.widget() {
        Widget::Toggle { label, checked } => row![
            text(label.as_str()).width(Length::Fill),
            toggler(*checked).on_toggle(move |on| changed(Change::Toggled(on))),
        ]
        .spacing(10)
        .align_y(Alignment::Center)
        .into(),

        Widget::Choice { options, selected } => {
            let current = selected.parse::<i64>().ok();
            let buttons: Vec<Element<'a, Message>> = options
                .iter()
                .filter_map(|option| {
                    let value = option.parse::<i64>().ok()?;
                    Some(
                        radio(option.as_str(), value, current, move |v| {
                            changed(Change::Selected(v.to_string()))
                        })
                        .into(),
                    )
                })
                .collect();
            row(buttons)
                .spacing(16)
                .align_y(Alignment::Center)
                .into()
        }

        Widget::Slider {
            min,
            max,
            position,
            value_label,
        } => row![
            slider(*min..=*max, *position, move |p| changed(Change::Slid(p)))
                .step(1.0)
                .width(Length::FillPortion(3)),
            text(value_label.as_str())
                .width(Length::FillPortion(1))
                .align_x(iced::alignment::Horizontal::Right),
        ]
        .spacing(10)
        .align_y(Alignment::Center)
        .into(),
    };

    match binding.caption() {
        Some(caption) => row![text(caption).width(Length::Fixed(CAPTION_WIDTH)), input]
            .spacing(10)
            .align_y(Alignment::Center)
            .into(),
        None => input,
    }
}
