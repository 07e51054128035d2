//! Game catalog: games, their pattern sets, and the app registry.
//!
//! Read-heavy, admin-write-rare. Games live in a `DashMap` keyed by the
//! uppercased game name; the app list keeps admin insertion order behind an
//! `RwLock`.

use std::sync::RwLock;

use dashmap::DashMap;
use tracing::info;

use augur_core::config::{CatalogConfig, PatternConfig};
use augur_core::errors::CatalogError;
use augur_core::models::{Axis, Game, Label, Pattern};

/// Thread-safe catalog of games and apps.
pub struct GameCatalog {
    games: DashMap<String, Game>,
    apps: RwLock<Vec<String>>,
    pattern_cfg: PatternConfig,
    catalog_cfg: CatalogConfig,
}

impl GameCatalog {
    /// An empty catalog. Most callers want [`GameCatalog::with_defaults`].
    pub fn new(pattern_cfg: PatternConfig, catalog_cfg: CatalogConfig) -> Self {
        Self {
            games: DashMap::new(),
            apps: RwLock::new(Vec::new()),
            pattern_cfg,
            catalog_cfg,
        }
    }

    /// A catalog seeded with the stock games and apps.
    pub fn with_defaults(pattern_cfg: PatternConfig, catalog_cfg: CatalogConfig) -> Self {
        let catalog = Self::new(pattern_cfg, catalog_cfg);
        catalog.install_default_games();
        catalog.install_default_apps();
        catalog
    }

    fn install_default_games(&self) {
        for game in Self::default_games() {
            self.games.insert(game.name.clone(), game);
        }
    }

    fn install_default_apps(&self) {
        *self.apps.write().expect("apps lock poisoned") = Self::default_apps();
    }

    fn default_games() -> Vec<Game> {
        vec![
            Game::new("WINGO", Axis::Single, 0),
            Game::new("K3", Axis::Dual, 0),
        ]
    }

    fn default_apps() -> Vec<String> {
        ["1win", "Bet365", "Fun88"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    // --- Games ---

    /// Register a new game. Names are normalized to uppercase. When
    /// `cooldown_secs` is `None`, the configured default applies.
    pub fn add_game(
        &self,
        name: &str,
        axis: Axis,
        cooldown_secs: Option<u64>,
    ) -> Result<(), CatalogError> {
        let name = name.to_uppercase();
        if self.games.contains_key(&name) {
            return Err(CatalogError::Duplicate(name));
        }
        let cooldown = cooldown_secs.unwrap_or(self.catalog_cfg.default_cooldown_secs);
        info!(game = %name, cooldown, "game added");
        self.games.insert(name.clone(), Game::new(name, axis, cooldown));
        Ok(())
    }

    /// Remove a game and its patterns. Deleting the last game restores the
    /// stock catalog, so the bot is never left with nothing to predict.
    pub fn delete_game(&self, name: &str) -> Result<(), CatalogError> {
        let name = name.to_uppercase();
        if self.games.remove(&name).is_none() {
            return Err(CatalogError::UnknownGame(name));
        }
        info!(game = %name, "game deleted");
        if self.games.is_empty() {
            self.install_default_games();
        }
        Ok(())
    }

    pub fn set_cooldown(&self, name: &str, cooldown_secs: u64) -> Result<(), CatalogError> {
        let name = name.to_uppercase();
        let mut game = self
            .games
            .get_mut(&name)
            .ok_or(CatalogError::UnknownGame(name.clone()))?;
        game.cooldown_secs = cooldown_secs;
        info!(game = %name, cooldown = cooldown_secs, "cooldown updated");
        Ok(())
    }

    /// A cloned snapshot of one game, or `UnknownGame`.
    pub fn game(&self, name: &str) -> Result<Game, CatalogError> {
        let name = name.to_uppercase();
        self.games
            .get(&name)
            .map(|g| g.clone())
            .ok_or(CatalogError::UnknownGame(name))
    }

    /// All games, sorted by name for stable listings.
    pub fn games(&self) -> Vec<Game> {
        let mut games: Vec<Game> = self.games.iter().map(|r| r.value().clone()).collect();
        games.sort_by(|a, b| a.name.cmp(&b.name));
        games
    }

    // --- Patterns ---

    /// Add a pattern rule to a game. The sequence length must fall inside the
    /// configured bounds and every label (outcome included) must belong to
    /// the game's axis. Exact duplicates are idempotent.
    pub fn add_pattern(
        &self,
        game: &str,
        sequence: Vec<Label>,
        outcome: Label,
    ) -> Result<(), CatalogError> {
        let name = game.to_uppercase();
        let mut game = self
            .games
            .get_mut(&name)
            .ok_or(CatalogError::UnknownGame(name.clone()))?;

        let len = sequence.len();
        if len < self.pattern_cfg.min_len || len > self.pattern_cfg.max_len {
            return Err(CatalogError::InvalidSequence {
                reason: format!(
                    "length {len} outside {}..={}",
                    self.pattern_cfg.min_len, self.pattern_cfg.max_len
                ),
            });
        }
        if let Some(bad) = sequence
            .iter()
            .chain(std::iter::once(&outcome))
            .find(|l| !game.axis.permits(**l))
        {
            return Err(CatalogError::InvalidSequence {
                reason: format!("label {bad} not valid for this game"),
            });
        }

        let pattern = Pattern { sequence, outcome };
        if game.patterns.contains(&pattern) {
            return Ok(());
        }
        info!(game = %name, pattern = %display_sequence(&pattern.sequence), outcome = %pattern.outcome, "pattern added");
        game.patterns.push(pattern);
        Ok(())
    }

    /// Remove every pattern with the given sequence, regardless of outcome.
    /// The sequence is the removal key, not the (sequence, outcome) pair.
    pub fn remove_pattern(&self, game: &str, sequence: &[Label]) -> Result<(), CatalogError> {
        let name = game.to_uppercase();
        let mut game = self
            .games
            .get_mut(&name)
            .ok_or(CatalogError::UnknownGame(name.clone()))?;

        let before = game.patterns.len();
        game.patterns.retain(|p| p.sequence != sequence);
        if game.patterns.len() == before {
            return Err(CatalogError::NotFound);
        }
        info!(game = %name, pattern = %display_sequence(sequence), removed = before - game.patterns.len(), "pattern removed");
        Ok(())
    }

    /// A game's patterns in insertion order.
    pub fn list_patterns(&self, game: &str) -> Result<Vec<Pattern>, CatalogError> {
        Ok(self.game(game)?.patterns)
    }

    // --- Apps ---

    pub fn add_app(&self, name: &str) -> Result<(), CatalogError> {
        let mut apps = self.apps.write().expect("apps lock poisoned");
        if apps.iter().any(|a| a == name) {
            return Err(CatalogError::Duplicate(name.to_string()));
        }
        info!(app = %name, "app added");
        apps.push(name.to_string());
        Ok(())
    }

    /// Removing the last app restores the stock list, mirroring game
    /// deletion.
    pub fn remove_app(&self, name: &str) -> Result<(), CatalogError> {
        let mut apps = self.apps.write().expect("apps lock poisoned");
        let before = apps.len();
        apps.retain(|a| a != name);
        if apps.len() == before {
            return Err(CatalogError::UnknownApp(name.to_string()));
        }
        info!(app = %name, "app removed");
        if apps.is_empty() {
            *apps = Self::default_apps();
        }
        Ok(())
    }

    pub fn has_app(&self, name: &str) -> bool {
        self.apps
            .read()
            .expect("apps lock poisoned")
            .iter()
            .any(|a| a == name)
    }

    pub fn apps(&self) -> Vec<String> {
        self.apps.read().expect("apps lock poisoned").clone()
    }

    // --- Snapshot support ---

    /// Replace the whole catalog with snapshot contents.
    pub fn restore(&self, games: Vec<Game>, apps: Vec<String>) {
        self.games.clear();
        for game in games {
            self.games.insert(game.name.clone(), game);
        }
        *self.apps.write().expect("apps lock poisoned") = apps;
    }
}

fn display_sequence(sequence: &[Label]) -> String {
    sequence
        .iter()
        .map(Label::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
