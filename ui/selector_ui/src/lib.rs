//! Panel that lists the cookie skins the player can pick from.
//!
//! Opened and closed with `P` once the selector toggle is unlocked.

use {
    bevy::prelude::*,
    cookie_selector::{
        SelectionState, SelectorChoice, SelectorConfig, SkinRegistry, resolve_active,
        selector_choices,
    },
    selector_events::SkinChoicePicked,
    states::{GameState, SelectorPanelState},
    upgrades::Upgrades,
    widgets::{UiTheme, spawn_caption, spawn_card, spawn_choice_button},
};

pub struct SelectorUiPlugin;

impl Plugin for SelectorUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SelectorPanelState>()
            .add_systems(OnEnter(SelectorPanelState::Open), spawn_selector_ui)
            .add_systems(OnExit(SelectorPanelState::Open), despawn_selector_ui)
            .add_systems(
                Update,
                toggle_selector_panel.run_if(in_state(GameState::Running)),
            )
            .add_systems(
                Update,
                (handle_choice_button, update_selector_ui)
                    .run_if(in_state(SelectorPanelState::Open)),
            );
    }
}

#[derive(Component)]
pub struct SelectorUiRoot;

#[derive(Component)]
pub struct SelectorItemsContainer;

#[derive(Component)]
pub struct ChoiceButton {
    pub index: usize,
}

#[derive(PartialEq, Clone, Debug)]
pub struct SelectorDisplayData {
    pub current: String,
    /// Index aligned with the pick indices; `None` entries are hidden.
    pub choices: Vec<Option<SelectorChoice>>,
}

/// Builds what the panel shows from the selector state.
pub fn selector_display_data(
    registry: &SkinRegistry,
    selection: &SelectionState,
    upgrades: &Upgrades,
    config: &SelectorConfig,
) -> SelectorDisplayData {
    let automatic_icon = upgrades
        .get(&config.selector_upgrade)
        .map(|toggle| toggle.icon.clone())
        .unwrap_or_default();
    let current = resolve_active(registry, selection, upgrades, &config.gating_upgrade)
        .map(|skin| skin.name().to_string())
        .unwrap_or_else(|| "what".to_string());

    SelectorDisplayData {
        current,
        choices: selector_choices(registry, selection, upgrades, &automatic_icon),
    }
}

fn toggle_selector_panel(
    keyboard: Res<ButtonInput<KeyCode>>,
    upgrades: Res<Upgrades>,
    config: Res<SelectorConfig>,
    panel: Res<State<SelectorPanelState>>,
    mut next_panel: ResMut<NextState<SelectorPanelState>>,
) {
    let unlocked = upgrades
        .get(&config.selector_upgrade)
        .is_some_and(|toggle| toggle.unlocked);

    match panel.get() {
        SelectorPanelState::Open if !unlocked => {
            debug!("selector toggle locked, closing panel");
            next_panel.set(SelectorPanelState::Closed);
        }
        SelectorPanelState::Open if keyboard.just_pressed(KeyCode::KeyP) => {
            next_panel.set(SelectorPanelState::Closed);
        }
        SelectorPanelState::Closed if unlocked && keyboard.just_pressed(KeyCode::KeyP) => {
            next_panel.set(SelectorPanelState::Open);
        }
        _ => {}
    }
}

fn spawn_selector_ui(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(80.0),
                width: Val::Px(260.0),
                ..default()
            },
            SelectorUiRoot,
        ))
        .with_children(|root| {
            spawn_card(root, UiRect::all(Val::Px(12.0)), |card| {
                card.spawn((
                    Text::new("Perfect cookie selector"),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(UiTheme::TEXT_PRIMARY),
                ));
                card.spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        width: Val::Percent(100.0),
                        ..default()
                    },
                    SelectorItemsContainer,
                ));
            });
        });
}

fn despawn_selector_ui(mut commands: Commands, roots: Query<Entity, With<SelectorUiRoot>>) {
    for root in roots.iter() {
        commands.entity(root).despawn();
    }
}

struct PopulateSelectorCommand {
    data: SelectorDisplayData,
}

impl Command for PopulateSelectorCommand {
    fn apply(self, world: &mut World) {
        let mut container_query =
            world.query_filtered::<(Entity, Option<&Children>), With<SelectorItemsContainer>>();

        let Some((container_entity, children)) = container_query.iter(world).next() else {
            return;
        };

        if let Some(children) = children {
            let children_vec: Vec<_> = children.to_vec();
            for child in children_vec {
                world.commands().entity(child).despawn();
            }
        }

        world
            .commands()
            .entity(container_entity)
            .with_children(|parent| {
                spawn_caption(parent, format!("Current: {}", self.data.current));
                for (index, choice) in self.data.choices.iter().enumerate() {
                    let Some(choice) = choice else {
                        continue;
                    };
                    spawn_choice_button(
                        parent,
                        &choice_label(choice),
                        choice.selected,
                        ChoiceButton { index },
                    );
                }
            });
    }
}

fn choice_label(choice: &SelectorChoice) -> String {
    format!("{} [{},{}]", choice.name, choice.icon.x, choice.icon.y)
}

fn handle_choice_button(
    mut commands: Commands,
    interaction_query: Query<(&Interaction, &ChoiceButton), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, btn) in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            commands.trigger(SkinChoicePicked { index: btn.index });
        }
    }
}

fn update_selector_ui(
    mut commands: Commands,
    registry: Res<SkinRegistry>,
    selection: Res<SelectionState>,
    upgrades: Res<Upgrades>,
    config: Res<SelectorConfig>,
    container_query: Query<Option<&Children>, With<SelectorItemsContainer>>,
    mut last_data: Local<Option<SelectorDisplayData>>,
) {
    let Some(children) = container_query.iter().next() else {
        return;
    };

    let data = selector_display_data(&registry, &selection, &upgrades, &config);

    let container_empty = children.is_none_or(|children| children.is_empty());
    if !container_empty && last_data.as_ref() == Some(&data) {
        return;
    }
    *last_data = Some(data.clone());

    commands.queue(PopulateSelectorCommand { data });
}
