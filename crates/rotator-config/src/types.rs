// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to a section of `rotator_configuration.toml`. Every field
//! has a default, so a partial (or absent) file is always loadable.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RotatorConfig {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub scheduler: SchedulerConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Grace period for in-flight requests on shutdown
    pub shutdown_grace_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 14467,
            shutdown_grace_secs: 5,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding; IPv6 literals are bracketed
    pub fn bind_address(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.port).to_string(),
            Err(_) => format!("{}:{}", self.host, self.port),
        }
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

/// Served content configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory listed once at startup; every non-directory entry is an image
    pub image_dir: PathBuf,
    /// Quotes served by `/quote`
    pub quotes: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("./images"),
            quotes: DEFAULT_QUOTES.iter().map(|q| q.to_string()).collect(),
        }
    }
}

/// Reshuffle scheduler configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub reshuffle_interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            reshuffle_interval_secs: 3600,
        }
    }
}

impl SchedulerConfig {
    pub fn reshuffle_interval(&self) -> Duration {
        Duration::from_secs(self.reshuffle_interval_secs)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when no per-crate debug flags are given
    pub level: String,
    /// Enables rolling JSON file logs under this directory
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

/// Built-in quote list, used when the config does not provide one.
pub const DEFAULT_QUOTES: &[&str] = &[
    "Hi, Astral Expressers... Well, you caught me.",
    "All space and time are practically infinite, and yet right here, right now, we find ourselves together. That's the nature of 'destiny' — it creates a miracle but convinces you of an accident.",
    "Oh, bye-bye, (Trailblazer). See if you can surprise me next time.",
    "Before I joined the Stellaron Hunters, the nature of my work meant that I barely ever saw the same person twice.",
    "Elio said that I'm good at creating 'fear,' even though I don't know what it is.",
    "Playing the violin and firing a gun both require flexible fingers, but bullets are more obedient.",
    "I especially love velvet coats, they're so fragile and beautiful. Difficult to maintain — you only have to be a tiny bit careless to ruin the sheen.",
    "The past and the future are so similar to each other. I'm indifferent towards them.",
    "There's a planet I go to every summer to look at the sea. That's when the tides are fiercest — you have to stand far away on the shore. Then, one year, they constructed a long observation pier. I haven't been back since.",
    "My home world is one of many planets changed by a Stellaron... *sigh* It's a shame I never got to witness how far it fell at the time.",
    "I like chatting with Silver Wolf. She's got a lot of ideas for someone so small.",
    "Bladie... He takes after his name — his fights are a pleasure to witness.",
    "Oh, Sam isn't nearly as picky about his prey as I am... you might consider it a lucky break running into me.",
    "No one can completely grasp another's thoughts... Not even you or I.",
    "If destiny can't propel me forward, I'll be the one to push destiny.",
    "It's tough to get going again once you've stopped, don't you think?",
    "The path to the future begins right here.",
    "(Trailblazer), we meet again.",
    "Let's skip the formalities, Silver Wolf. I'm always game for putting on a show.",
    "The hunt beckons, Bladie. Are you ready?",
    "Oh, the Express Crew. Looks like we'll be joining forces quite often, huh?",
    "Caught in the net.",
    "Just in time.",
    "May as well kill them all~",
    "That breathing sensation? Remember it.",
    "Time to move.",
    "This won't take long.",
    "Didn't hurt.",
    "Not bad.",
    "Good times never last.",
    "Time to say bye. BOOM.",
    "Relax.",
    "Stand still.",
    "This... isn't the end.",
    "Oh! I'm still alive.",
    "Thanks. You're too good to me.",
    "Does that hurt?",
    "The human body is beautiful in its fragility.",
    "Hmm. We can use it.",
    "No surprise there.",
    "Like what you see? Me too.",
    "Nice work.",
    "Impressive. Want a prize?",
    "Huh, they don't look happy to see us...",
    "*sigh* Is that a stain? I like this coat.",
];
