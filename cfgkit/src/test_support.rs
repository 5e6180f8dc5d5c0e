use crate::data::{schema::Schema, store::Config};

pub const SCENARIO_JSON: &str = r#"{
  "strings": {
    "PRG_Title": "Test Tool",
    "PRG_Ini_name": "game.ini",
    "Video_Vsync": "Vertical sync",
    "TAB_Display": "Display"
  },
  "sections": [
    { "name": "Video", "options": [
      { "name": "Vsync", "type": "check", "default": 0,
        "label": "Video_Vsync", "desc": "Video_Vsync_desc" },
      { "name": "Resolution", "type": "list",
        "values": ["640x480", "1280x720"], "default": 1 }
    ]},
    { "name": "Game", "options": [
      { "name": "Difficulty", "type": "list",
        "values": ["Easy", "Normal", "Hard"], "default": 1 },
      { "name": "Name", "type": "text", "default": "Player" },
      { "name": "Pad", "type": "pad" }
    ]}
  ],
  "groups": [
    { "name": "TAB_Display", "subgroups": [
      { "name": "GRP_Output", "options": [
        { "section": "Video", "option": "Resolution" },
        { "section": "Video", "option": "Vsync" }
      ]},
      { "name": "GRP_Input", "options": [
        { "section": "Audio", "option": "Volume" },
        { "section": "Game", "option": "Pad" }
      ]}
    ]},
    { "name": "TAB_Game", "subgroups": [
      { "name": "GRP_Player", "options": [
        { "section": "Game", "option": "Difficulty" },
        { "section": "Game", "option": "Name" }
      ]}
    ]}
  ]
}"#;

pub fn scenario_schema() -> Schema {
    Schema::from_json_str(SCENARIO_JSON).unwrap()
}

pub fn scenario_config() -> Config {
    Config::new(scenario_schema())
}
