//! Main iced application for camctl-gui.
//!
//! State -> View -> Message -> Update -> State. Device reads happen once, before
//! the window opens; every update writes synchronously on the UI thread.

use iced::widget::{button, column, container, row, scrollable, space, text};
use iced::{Alignment, Element, Length, Task};
use tracing::error;

use crate::gui::message::Message;
use crate::gui::widgets;
use crate::manager::Manager;

#[derive(Default)]
pub struct ControlPanel {
    manager: Manager,
    current_tab: usize,
    last_error: Option<String>,
}

impl ControlPanel {
    pub fn new(manager: Manager) -> Self {
        Self {
            manager,
            current_tab: 0,
            last_error: None,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                if tab < self.manager.len() {
                    self.current_tab = tab;
                }
            }
            Message::Changed {
                tab,
                control,
                change,
            } => {
                match self.manager.dispatch(tab, control, change) {
                    Ok(_) => {}
                    // Already logged by the binding; the widget keeps the user's value.
                    Err(err) if err.is_interaction() => self.last_error = Some(err.to_string()),
                    // A message for a tab or control that is not on screen.
                    Err(err) => error!(tab, %control, %err, "dropping change"),
                }
            }
            Message::DismissError => self.last_error = None,
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content = scrollable(self.view_tab_content()).height(Length::Fill);
        column![self.view_tab_bar(), content, self.view_footer()]
            .spacing(0)
            .into()
    }

    fn view_tab_bar(&self) -> Element<'_, Message> {
        let tabs: Vec<Element<'_, Message>> = self
            .manager
            .tabs()
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let label = text(tab.layout().device_name());
                let btn = button(label).padding([8, 16]);
                if i == self.current_tab {
                    btn.into()
                } else {
                    btn.on_press(Message::TabSelected(i)).into()
                }
            })
            .collect();

        container(row(tabs).spacing(4).padding([8, 20]).align_y(Alignment::Center))
            .width(Length::Fill)
            .into()
    }

    fn view_tab_content(&self) -> Element<'_, Message> {
        let Some(layout) = self.manager.layout(self.current_tab) else {
            return container(text("No devices found."))
                .padding(20)
                .into();
        };

        let mut rows: Vec<Element<'_, Message>> = layout
            .bindings()
            .iter()
            .map(|binding| widgets::control_row(self.current_tab, binding))
            .collect();
        if rows.is_empty() {
            rows.push(text("This device has no adjustable controls.").into());
        }

        column(rows).spacing(12).padding(20).into()
    }

    fn view_footer(&self) -> Element<'_, Message> {
        let status: Element<'_, Message> = match &self.last_error {
            Some(err) => row![
                text(err.as_str()).size(12),
                space().width(Length::Fill),
                button(text("Dismiss").size(12))
                    .on_press(Message::DismissError)
                    .padding([4, 10]),
            ]
            .align_y(Alignment::Center)
            .into(),
            None => text(format!("{} device(s)", self.manager.len()))
                .size(12)
                .into(),
        };

        container(status).padding([8, 20]).width(Length::Fill).into()
    }
}
