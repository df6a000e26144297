use bevy::prelude::*;

/// Shared colors of every panel and toast.
pub struct UiTheme;

impl UiTheme {
    pub const PANEL_BG: Color = Color::srgba(0.11, 0.14, 0.2, 0.95);
    pub const CARD_BORDER: Color = Color::srgba(1.0, 1.0, 1.0, 0.05);
    pub const TEXT_PRIMARY: Color = Color::WHITE;
    pub const TEXT_SECONDARY: Color = Color::srgb(0.61, 0.64, 0.69);
    pub const BUTTON_BG: Color = Color::srgba(0.2, 0.2, 0.2, 1.0);
    pub const BUTTON_HOVER: Color = Color::srgba(0.28, 0.28, 0.32, 1.0);
    pub const SELECTED: Color = Color::srgb(0.95, 0.77, 0.3);
    pub const WARNING_BG: Color = Color::srgba(0.22, 0.12, 0.08, 0.92);
    pub const WARNING_BORDER: Color = Color::srgb(0.85, 0.45, 0.25);
}

/// Spawns a card with a standard style, providing a container for content.
pub fn spawn_card(
    parent: &mut ChildSpawnerCommands,
    padding: UiRect,
    children: impl FnOnce(&mut ChildSpawnerCommands),
) {
    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                padding,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(UiTheme::PANEL_BG),
            BorderColor::all(UiTheme::CARD_BORDER),
        ))
        .with_children(children);
}

/// Spawns a small label in the secondary text color.
pub fn spawn_caption(parent: &mut ChildSpawnerCommands, text: impl Into<String>) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(UiTheme::TEXT_SECONDARY),
    ));
}

/// Spawns a full-width choice button. Selected choices get a highlighted
/// border.
pub fn spawn_choice_button<M: Component>(
    parent: &mut ChildSpawnerCommands,
    text: &str,
    selected: bool,
    marker: M,
) {
    let border = if selected {
        UiTheme::SELECTED
    } else {
        UiTheme::CARD_BORDER
    };

    parent
        .spawn((
            Button,
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(30.0),
                margin: UiRect::top(Val::Px(4.0)),
                border: UiRect::all(Val::Px(2.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BorderColor::all(border),
            BackgroundColor(UiTheme::BUTTON_BG),
            marker,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(text),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(UiTheme::TEXT_PRIMARY),
            ));
        });
}
