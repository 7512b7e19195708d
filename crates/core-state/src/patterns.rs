//! Built-in practice texts.
//!
//! Each text becomes a session grid by splitting on newlines with every space kept,
//! so leading and trailing whitespace is part of the board. Several texts pad their
//! rows on purpose to exercise `^` and `g_`.

use core_text::Grid;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPattern {
    pub name: &'static str,
    pub description: &'static str,
    pub text: &'static str,
}

impl TextPattern {
    pub fn grid(&self) -> Grid {
        Grid::from_text(self.text)
    }
}

const fn entry(name: &'static str, description: &'static str, text: &'static str) -> TextPattern {
    TextPattern {
        name,
        description,
        text,
    }
}

pub const PATTERNS: [TextPattern; 12] = [
    entry(
        "welcome",
        "Welcome message",
        r##"Welcome to boba.vim !
This game helps you learn vim motions fundamentals,
it's a long journey but with patience,
determination you'll master it!
Florent."##,
    ),
    entry(
        "javascript",
        "JavaScript function",
        r##"function movePlayer(direction) {
    if (direction === "up") {
        player.y -= 1;
    } else if (direction === "down") {
        player.y += 1;
    } else if (direction === "left") {
        player.x -= 1;
    } else if (direction === "right") {
        player.x += 1;
    }
    return player;
}"##,
    ),
    entry(
        "server-config",
        "YAML server configuration",
        r##"server:
  host: localhost
  port: 8080
  ssl: true
  max_connections: 1000
database:
  url: postgres://localhost/boba_vim
  pool_size: 10
  timeout: 30s
cache:
  redis_url: redis://localhost:6379
  ttl: 3600"##,
    ),
    entry(
        "motions-guide",
        "Markdown motions guide",
        r##"# Vim Motions Guide
## Basic Movement
- h: move left
- j: move down  
- k: move up
- l: move right

## Word Movement
- w: next word beginning
- b: previous word beginning
- e: end of word

## Line Movement
- 0: start of line
- $: end of line
- ^: first non-blank character
- g_: last non-blank character

## File Movement
- gg: top of file
- G: bottom of file"##,
    ),
    entry(
        "package-json",
        "JSON package manifest",
        r##"{
  "name": "boba-vim",
  "version": "1.0.0",
  "description": "Learn vim with boba tea!",
  "config": {
    "movement": ["h", "j", "k", "l"],
    "search": ["f", "F", "t", "T"],
    "navigation": ["w", "b", "e", "0", "$"]
  },
  "features": {
    "character_search": true,
    "word_movement": true,
    "line_navigation": true
  }
}"##,
    ),
    entry(
        "stylesheet",
        "CSS styles",
        r##".vim-game {
  background: #2c3e50;
  color: #ecf0f1;
  font-family: monospace;
  padding: 20px;
}

.player {
  position: absolute;
  width: 20px;
  height: 20px;
  background: #f39c12;
  border-radius: 50%;
  transition: all 0.2s ease;
}

.key {
  display: inline-block;
  padding: 8px 12px;
  margin: 2px;
  border: 2px solid #bdc3c7;
  border-radius: 4px;
}"##,
    ),
    entry(
        "python-game",
        "Python class",
        r##"import random
import time

class BobaGame:
    def __init__(self):
        self.player_pos = {"x": 0, "y": 0}
        self.score = 0
        self.pearls = []
        
    def move_player(self, direction):
        if direction == "h":
            self.player_pos["x"] -= 1
        elif direction == "j":
            self.player_pos["y"] += 1
        elif direction == "k":
            self.player_pos["y"] -= 1
        elif direction == "l":
            self.player_pos["x"] += 1
            
    def collect_pearl(self):
        self.score += 100
        self.spawn_new_pearl()
        
    def spawn_new_pearl(self):
        x = random.randint(0, 20)
        y = random.randint(0, 15)
        self.pearls.append({"x": x, "y": y})"##,
    ),
    entry(
        "padded-javascript",
        "Heavily indented JavaScript",
        r##"        function calculateScore() {        
            let base = 1000;        
            let penalty = time * 10;        
                
            if (moves < 50) {        
                bonus = 200;        
            } else {        
                bonus = 0;        
            }        
            return base + bonus - penalty;        
        }"##,
    ),
    entry(
        "sql",
        "SQL queries",
        r##"SELECT u.username, u.email, p.score, p.completion_time
FROM users u
JOIN player_stats p ON u.id = p.user_id
WHERE p.score > 1000
  AND p.completion_time < 300
ORDER BY p.score DESC, p.completion_time ASC
LIMIT 10;

UPDATE game_sessions 
SET is_completed = true,
    final_score = current_score,
    end_time = NOW()
WHERE session_token = ? AND is_active = true;"##,
    ),
    entry(
        "padded-config",
        "Indented configuration",
        r##"     server:     
       host: localhost      
       port: 8080    
       ssl: true     
     database:    
       url: postgres://localhost/db     
       pool_size: 10      
     cache:    
       redis: localhost:6379     
       ttl: 3600      "##,
    ),
    entry(
        "mixed-spacing",
        "Mixed spacing assignments",
        r##"         x = 1;           
              y = 2;        
      a = 4;            
             b = 5;      
     final = x + y + a + b;        "##,
    ),
    entry(
        "go-player",
        "Go struct and method",
        r##"package main

import (
    "fmt"
    "net/http"
    "log"
)

type Player struct {
    ID       int    `json:"id"`
    Username string `json:"username"`
    Score    int    `json:"score"`
    Position struct {
        X int `json:"x"`
        Y int `json:"y"`
    } `json:"position"`
}

func (p *Player) Move(direction string) {
    switch direction {
    case "h":
        p.Position.X--
    case "j":
        p.Position.Y++
    case "k":
        p.Position.Y--
    case "l":
        p.Position.X++
    }
}"##,
    ),
];

pub fn pattern_count() -> usize {
    PATTERNS.len()
}

/// Pattern at `index`, or `None` past the end of the library.
pub fn pattern(index: usize) -> Option<&'static TextPattern> {
    PATTERNS.get(index)
}

pub fn pattern_grid(index: usize) -> Option<Grid> {
    pattern(index).map(TextPattern::grid)
}

/// Pick a pattern uniformly at random; returns its index alongside.
pub fn random_pattern<R: Rng + ?Sized>(rng: &mut R) -> (usize, &'static TextPattern) {
    let index = rng.gen_range(0..PATTERNS.len());
    (index, &PATTERNS[index])
}
