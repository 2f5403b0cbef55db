//! Server-rendered HTML.

use minijinja::Environment;
use serde::Serialize;

const CHAT_TEMPLATE: &str = "chat.html";

/// Compiled templates. The `.html` suffix turns on HTML auto-escaping, so
/// message content is always rendered as text.
#[derive(Debug)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn load() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(CHAT_TEMPLATE, include_str!("../templates/chat.html"))?;
        Ok(Self { env })
    }

    pub fn render_chat<C: Serialize>(&self, ctx: C) -> Result<String, minijinja::Error> {
        self.env.get_template(CHAT_TEMPLATE)?.render(ctx)
    }
}
