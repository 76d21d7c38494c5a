//! Main window view.
//!
//! Output directory row, CSV drop zone, notice banner, file-name preview,
//! progress bar with the Start button, and the log panel.

use iced::alignment::Horizontal;
use iced::widget::{
    button, column, container, progress_bar, row, scrollable, text, text_input, Column,
};
use iced::{Alignment, Background, Border, Element, Length};

use crate::app::{App, Message, Notice, Phase};
use crate::theme::{colors, font, spacing};

/// Build the main window view.
pub fn view(app: &App) -> Element<'_, Message> {
    let mut content = column![output_row(app), drop_zone(app)]
        .spacing(spacing::MD)
        .padding(spacing::LG);

    if let Some(notice) = &app.notice {
        content = content.push(notice_banner(notice));
    }

    content = content
        .push(preview_section(app))
        .push(progress_section(app))
        .push(log_section(app));

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Output directory label, input and Browse button.
fn output_row(app: &App) -> Element<'_, Message> {
    let editable = app.phase != Phase::Processing;

    let input = text_input("Output directory", &app.output_dir)
        .size(font::NORMAL)
        .width(Length::Fill);
    let input = if editable {
        input.on_input(Message::OutputDirChanged)
    } else {
        input
    };

    column![
        text("Output Directory:").size(font::NORMAL),
        row![
            input,
            button(text("Browse").size(font::NORMAL))
                .on_press_maybe(editable.then_some(Message::BrowseOutput))
                .padding([spacing::XS, spacing::LG]),
        ]
        .spacing(spacing::SM)
        .align_y(Alignment::Center),
    ]
    .spacing(spacing::XS)
    .into()
}

/// Drop target for the format CSV, with a picker fallback.
fn drop_zone(app: &App) -> Element<'_, Message> {
    let loaded = app.csv.is_some();
    let border_color = if loaded {
        colors::SUCCESS
    } else {
        colors::PRIMARY
    };

    let caption = match &app.csv {
        Some(csv) => format!("Loaded {}", csv.path.display()),
        None => "Drop formats.csv here".to_string(),
    };

    let content = column![
        text(caption).size(font::LG),
        button(text("Choose CSV...").size(font::NORMAL))
            .on_press_maybe((app.phase != Phase::Processing).then_some(Message::BrowseCsv))
            .padding([spacing::XS, spacing::LG]),
    ]
    .spacing(spacing::SM)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .padding(spacing::XL)
        .align_x(Horizontal::Center)
        .style(move |_theme| container::Style {
            border: Border {
                color: border_color,
                width: 2.0,
                radius: 6.0_f32.into(),
            },
            ..container::Style::default()
        })
        .into()
}

fn notice_banner(notice: &Notice) -> Element<'_, Message> {
    let (message, background) = match notice {
        Notice::Error(m) => (m.as_str(), colors::ERROR_BG),
        Notice::Success(m) => (m.as_str(), colors::SUCCESS_BG),
    };

    container(
        row![
            text(message)
                .size(font::NORMAL)
                .color(colors::TEXT_ON_BANNER)
                .width(Length::Fill),
            button(text("Dismiss").size(font::SM))
                .on_press(Message::DismissNotice)
                .padding([spacing::XS, spacing::SM]),
        ]
        .spacing(spacing::SM)
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(spacing::SM)
    .style(move |_theme| container::Style {
        background: Some(Background::Color(background)),
        border: Border {
            radius: 4.0_f32.into(),
            ..Border::default()
        },
        ..container::Style::default()
    })
    .into()
}

/// File names the loaded CSV will produce.
fn preview_section(app: &App) -> Element<'_, Message> {
    let names = app.csv.as_ref().map(|c| c.preview.as_slice()).unwrap_or(&[]);

    let list = Column::with_children(
        names
            .iter()
            .map(|name| text(name.as_str()).size(font::NORMAL).into()),
    )
    .spacing(2);

    column![
        text("Files to be generated:").size(font::NORMAL),
        scrollable(list).height(Length::FillPortion(3)).width(Length::Fill),
    ]
    .spacing(spacing::XS)
    .height(Length::FillPortion(3))
    .into()
}

/// Progress bar (while processing) and the Start button.
fn progress_section(app: &App) -> Element<'_, Message> {
    let mut section = column![].spacing(spacing::SM);

    if app.phase == Phase::Processing {
        let (completed, total) = app.progress;
        section = section.push(
            row![
                progress_bar(0.0..=total.max(1) as f32, completed as f32),
                text(format!("{}/{}", completed, total)).size(font::SM),
            ]
            .spacing(spacing::SM)
            .align_y(Alignment::Center),
        );
    }

    section = section.push(
        row![
            text(app.status_text.as_str()).size(font::SM).width(Length::Fill),
            button(text("Start Processing").size(font::NORMAL))
                .on_press_maybe(app.can_start().then_some(Message::Start))
                .padding([spacing::SM, spacing::XL]),
        ]
        .spacing(spacing::SM)
        .align_y(Alignment::Center),
    );

    section.into()
}

fn log_section(app: &App) -> Element<'_, Message> {
    let lines = Column::with_children(app.log_lines.iter().map(|line| {
        text(line.as_str())
            .size(font::SM)
            .color(colors::TEXT_MUTED)
            .into()
    }));

    column![
        text("Log").size(font::NORMAL),
        scrollable(lines).height(Length::FillPortion(2)).width(Length::Fill),
    ]
    .spacing(spacing::XS)
    .height(Length::FillPortion(2))
    .into()
}
