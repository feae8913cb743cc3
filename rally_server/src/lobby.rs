use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rally_core::{Config, Match};
use rally_proto::{validate_difficulty_name, MatchId, MatchService, MatchSnapshot, SessionError};

use crate::env::Environment;
use crate::host::MatchHost;
use crate::transport::GameClient;

/// All matches hosted by this process
pub struct Lobby {
    env: Box<dyn Environment>,
    config: Config,
    rng: StdRng,
    matches: HashMap<MatchId, MatchHost>,
}

impl Lobby {
    pub fn new(env: Box<dyn Environment>, config: Config, seed: u64) -> Self {
        Self {
            env,
            config,
            rng: StdRng::seed_from_u64(seed),
            matches: HashMap::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.env.now()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn host(&self, match_id: &MatchId) -> Option<&MatchHost> {
        self.matches.get(match_id)
    }

    fn host_mut(&mut self, match_id: &MatchId) -> Result<&mut MatchHost, SessionError> {
        self.matches
            .get_mut(match_id)
            .ok_or(SessionError::UnknownMatch(*match_id))
    }

    /// Attach a push channel to a match
    pub fn connect(
        &mut self,
        match_id: &MatchId,
        client: Box<dyn GameClient>,
    ) -> Result<(), SessionError> {
        let now = self.env.now();
        let host = self.host_mut(match_id)?;
        host.add_client(client, now)?;
        Ok(())
    }

    /// Feed one client frame to its match
    pub fn handle_bytes(&mut self, match_id: &MatchId, bytes: &[u8]) -> Result<(), SessionError> {
        let host = self.host_mut(match_id)?;
        host.handle_bytes(bytes)
            .map_err(|e| SessionError::InvalidInput(e.to_string()))
    }

    /// Advance every match by one tick
    pub fn tick(&mut self) {
        let now = self.env.now();
        for host in self.matches.values_mut() {
            host.step(now);
        }
    }

    /// Forget matches whose end has been announced
    pub fn prune_finished(&mut self) -> usize {
        let before = self.matches.len();
        self.matches.retain(|_id, host| !host.is_finished());
        let pruned = before - self.matches.len();
        if pruned > 0 {
            log::info!("Pruned {pruned} finished matches");
        }
        pruned
    }

    fn fresh_id(&mut self) -> MatchId {
        loop {
            let id = MatchId::random(&mut self.rng);
            if !self.matches.contains_key(&id) {
                return id;
            }
        }
    }
}

impl MatchService for Lobby {
    fn create_match(
        &mut self,
        player_name: &str,
        difficulty: &str,
    ) -> Result<MatchId, SessionError> {
        let difficulty = validate_difficulty_name(difficulty)?;
        let seed = self.rng.gen();
        let game = Match::new(player_name, difficulty, self.config.clone(), seed)?;

        let match_id = self.fresh_id();
        log::info!(
            "Created match {match_id} for {:?} ({})",
            player_name.trim(),
            game.difficulty()
        );
        self.matches.insert(match_id, MatchHost::new(match_id, game));
        Ok(match_id)
    }

    fn fetch_state(&self, match_id: &MatchId) -> Result<MatchSnapshot, SessionError> {
        self.matches
            .get(match_id)
            .map(|host| host.snapshot(self.env.now()))
            .ok_or(SessionError::UnknownMatch(*match_id))
    }

    fn start_match(&mut self, match_id: &MatchId) -> Result<(), SessionError> {
        let now = self.env.now();
        let host = self.host_mut(match_id)?;
        host.start(now)
            .map_err(|e| SessionError::InvalidInput(e.to_string()))
    }
}
