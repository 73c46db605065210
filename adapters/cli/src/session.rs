use std::collections::VecDeque;

use tile_blast_core::{Command, Event, GameConfig};
use tile_blast_system_boosters::{ActivationError, Boosters};
use tile_blast_system_gameplay::{Gameplay, Request};
use tile_blast_system_progress::Progress;
use tile_blast_world::{self as world, query, World};

use crate::config::Settings;

/// One playthrough wired together: the world, the gameplay router and the tally.
#[derive(Debug)]
pub(crate) struct Session {
    config: GameConfig,
    world: World,
    gameplay: Gameplay,
    progress: Progress,
}

impl Session {
    pub(crate) fn new(settings: Settings, seed: u64) -> Self {
        Self {
            config: settings.game,
            world: World::with_seed(settings.game, seed),
            gameplay: Gameplay::with_boosters(Boosters::with_inventory(settings.boosters)),
            progress: Progress::new(&settings.game),
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn gameplay(&self) -> &Gameplay {
        &self.gameplay
    }

    pub(crate) fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Starts a fresh playthrough with the session configuration.
    pub(crate) fn new_game(&mut self) -> Vec<Event> {
        let request = Request::NewGame {
            config: self.config,
        };
        self.submit(request).unwrap_or_default()
    }

    /// Routes one request and runs every follow-up command to completion.
    ///
    /// Requests other than a new game are dropped once the playthrough ended.
    pub(crate) fn submit(&mut self, request: Request) -> Result<Vec<Event>, ActivationError> {
        if !self.progress.accepts_input() && !matches!(request, Request::NewGame { .. }) {
            return Ok(Vec::new());
        }

        let mut log = Vec::new();
        let mut commands = Vec::new();
        self.gameplay.handle_request(
            request,
            query::grid_view(&self.world),
            &mut commands,
            &mut log,
        )?;
        self.pump(commands, &mut log);
        Ok(log)
    }

    fn pump(&mut self, commands: Vec<Command>, log: &mut Vec<Event>) {
        let mut pending: VecDeque<Command> = commands.into();
        while let Some(command) = pending.pop_front() {
            let mut events = Vec::new();
            world::apply(&mut self.world, command, &mut events);

            let mut follow_ups = Vec::new();
            let mut reactions = Vec::new();
            self.gameplay.handle_events(&events, &mut reactions);
            self.progress
                .handle(&events, &mut follow_ups, &mut reactions);

            log.append(&mut events);
            log.append(&mut reactions);
            pending.extend(follow_ups);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::config::Settings;
    use tile_blast_core::{BoosterKind, Event, GameConfig, Position};
    use tile_blast_system_gameplay::Request;
    use tile_blast_system_progress::Outcome;
    use tile_blast_world::query;

    fn session(game: GameConfig) -> Session {
        let mut session = Session::new(
            Settings {
                game,
                ..Settings::default()
            },
            17,
        );
        let _ = session.new_game();
        session
    }

    fn first_group_click(session: &Session) -> Option<Request> {
        let view = query::grid_view(session.world());
        view.size().positions().find_map(|cell| {
            let kind = view.kind_at(cell)?;
            let right = Position::new(cell.x() + 1, cell.y());
            let below = Position::new(cell.x(), cell.y() + 1);
            let matches = view.kind_at(right) == Some(kind) || view.kind_at(below) == Some(kind);
            matches.then_some(Request::TileClicked { position: cell })
        })
    }

    #[test]
    fn new_game_announces_field_tally_and_boosters() {
        let mut session = Session::new(Settings::default(), 5);

        let events = session.new_game();

        assert!(matches!(events[0], Event::GameStarted { .. }));
        assert!(events.contains(&Event::MovesChanged { remaining: 25 }));
        assert!(events.contains(&Event::BoosterStateChanged {
            kind: BoosterKind::Teleport,
            remaining_uses: 5,
            armed: false,
        }));
    }

    #[test]
    fn matching_click_runs_the_whole_cascade() {
        let mut session = session(GameConfig::default());
        let request = first_group_click(&session).expect("seeded field holds a group");

        let events = session.submit(request).expect("click accepted");

        assert!(events.contains(&Event::MoveConsumed));
        assert_eq!(events.last(), Some(&Event::CascadeSettled));
        assert_eq!(session.progress().moves(), 24);
        assert!(session.progress().score() >= 20);
        assert_eq!(query::grid_view(session.world()).occupied_count(), 64);
    }

    #[test]
    fn running_out_of_moves_shuffles_after_the_cascade() {
        let mut session = session(GameConfig {
            max_moves: 1,
            shuffle_attempts: 1,
            ..GameConfig::default()
        });
        let request = first_group_click(&session).expect("seeded field holds a group");

        let events = session.submit(request).expect("click accepted");

        let settled = events
            .iter()
            .position(|event| *event == Event::CascadeSettled)
            .expect("cascade settles");
        let shuffled = events
            .iter()
            .position(|event| *event == Event::FieldShuffled)
            .expect("field shuffles");
        assert!(settled < shuffled);
        assert_eq!(session.progress().moves(), 5);
        assert_eq!(session.progress().shuffles_left(), 0);
    }

    #[test]
    fn finished_game_refuses_everything_but_new_game() {
        let mut session = session(GameConfig {
            target_score: 10,
            ..GameConfig::default()
        });
        let request = first_group_click(&session).expect("seeded field holds a group");
        let events = session.submit(request).expect("click accepted");
        assert!(events.contains(&Event::GameWon));
        assert_eq!(session.progress().outcome(), Outcome::Won);

        let refused = session
            .submit(Request::ActivateBooster {
                kind: BoosterKind::Bomb,
            })
            .expect("refusal is silent");
        assert!(refused.is_empty());
        assert!(!session.gameplay().boosters().is_armed());

        let restarted = session.new_game();
        assert!(!restarted.is_empty());
        assert_eq!(session.progress().outcome(), Outcome::Playing);
    }

    #[test]
    fn activation_errors_reach_the_caller() {
        let mut session = session(GameConfig::default());
        let bomb = Request::ActivateBooster {
            kind: BoosterKind::Bomb,
        };
        let _ = session.submit(bomb).expect("first activation succeeds");

        assert!(session.submit(bomb).is_err());
    }
}
