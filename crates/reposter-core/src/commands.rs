use std::sync::Arc;

use crate::{
    auth,
    domain::ChatId,
    store::{ListKind, ListStore},
    Result,
};

const HELP: &str = "Hiii, this bot is made for reposting your lovely channels to your comfy chats\n\
                    \n\
                    /info  -- get admins/channels/chats list\n\
                    /setup -- if you just started use this command\n\
                    /ping  -- check if the bot is online \n\
                    /clear -- remove all admins/channels/chats\n\
                    \n\
                    /add_admin, /add_chan, /add_chat <...> -- example: /add_chan 123 -456 -780\n\
                    /del_admin, /del_chan, /del_chat <...> -- remove some admins/channels/chats";

const CLEARED: &str = "cleared.\n/setup?";

/// Recognized slash commands. Anything else is plain content and flows to
/// the relay engine instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Setup,
    AddAdmin,
    AddChan,
    AddChat,
    DelAdmin,
    DelChan,
    DelChat,
    Info,
    Clear,
    Ping,
    Pong,
}

impl Command {
    /// Parse `/cmd@botname arg1 arg2 ...` into the command and its raw
    /// whitespace-separated arguments.
    pub fn parse(text: &str) -> Option<(Command, Vec<&str>)> {
        let mut parts = text.split_whitespace();
        let first = parts.next()?;
        let name = first
            .strip_prefix('/')?
            .split('@')
            .next()
            .unwrap_or("")
            .to_lowercase();

        let cmd = match name.as_str() {
            "start" => Command::Start,
            "setup" => Command::Setup,
            "add_admin" => Command::AddAdmin,
            "add_chan" => Command::AddChan,
            "add_chat" => Command::AddChat,
            "del_admin" => Command::DelAdmin,
            "del_chan" => Command::DelChan,
            "del_chat" => Command::DelChat,
            "info" => Command::Info,
            "clear" => Command::Clear,
            "ping" => Command::Ping,
            "pong" => Command::Pong,
            _ => return None,
        };

        Some((cmd, parts.collect()))
    }
}

/// What the platform adapter should send back for a handled command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Plain reply that stays in the chat.
    Text(String),
    /// Short-lived "+" acknowledgment, deleted after `ACK_LIFETIME`.
    Ack,
}

/// Dispatch result: zero or more advisory notes, then an optional reply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub notes: Vec<String>,
    pub reply: Option<Reply>,
}

impl Outcome {
    fn silent() -> Self {
        Self::default()
    }

    fn text(s: impl Into<String>) -> Self {
        Self {
            notes: Vec::new(),
            reply: Some(Reply::Text(s.into())),
        }
    }

    fn ack() -> Self {
        Self {
            notes: Vec::new(),
            reply: Some(Reply::Ack),
        }
    }
}

#[derive(Clone, Copy)]
enum Op {
    Add,
    Remove,
}

/// Command dispatcher over the list store.
///
/// Authorization checks use the conversation's chat id; `/setup` enrolls the
/// sender's own id, so the first admin is the person talking, not the group
/// they happen to be in.
pub struct Dispatcher {
    store: Arc<dyn ListStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self { store }
    }

    pub async fn dispatch(
        &self,
        chat: ChatId,
        sender: ChatId,
        cmd: Command,
        args: &[&str],
    ) -> Result<Outcome> {
        match cmd {
            Command::Start => self.start(chat).await,
            Command::Setup => self.setup(sender).await,
            Command::AddAdmin => self.mutate(chat, ListKind::Admins, args, Op::Add).await,
            Command::AddChan => self.add_relay_list(chat, ListKind::Sources, "chan", args).await,
            Command::AddChat => {
                self.add_relay_list(chat, ListKind::Destinations, "chat", args)
                    .await
            }
            Command::DelAdmin => self.mutate(chat, ListKind::Admins, args, Op::Remove).await,
            Command::DelChan => self.mutate(chat, ListKind::Sources, args, Op::Remove).await,
            Command::DelChat => {
                self.mutate(chat, ListKind::Destinations, args, Op::Remove)
                    .await
            }
            Command::Info => self.info(chat).await,
            Command::Clear => self.clear(chat).await,
            Command::Ping => Ok(Outcome::text("/pong")),
            Command::Pong => Ok(Outcome::text("/ping")),
        }
    }

    /// The bot was added to a chat: remember it in the advisory joined list.
    pub async fn chat_joined(&self, chat: ChatId) -> Result<()> {
        self.store.add(ListKind::Joined, chat).await
    }

    async fn start(&self, chat: ChatId) -> Result<Outcome> {
        let store = self.store.as_ref();
        if !auth::is_configured(store).await? || auth::is_admin(store, chat).await? {
            return Ok(Outcome::text(HELP));
        }
        Ok(Outcome::silent())
    }

    async fn setup(&self, sender: ChatId) -> Result<Outcome> {
        if auth::is_configured(self.store.as_ref()).await? {
            return Ok(Outcome::silent());
        }
        self.store.add(ListKind::Admins, sender).await?;
        Ok(Outcome::ack())
    }

    async fn mutate(&self, chat: ChatId, list: ListKind, args: &[&str], op: Op) -> Result<Outcome> {
        if !auth::is_admin(self.store.as_ref(), chat).await? {
            return Ok(Outcome::silent());
        }
        for arg in args {
            let id: ChatId = arg.parse()?;
            match op {
                Op::Add => self.store.add(list, id).await?,
                Op::Remove => self.store.remove(list, id).await?,
            }
        }
        Ok(Outcome::ack())
    }

    /// `add_chan`/`add_chat`: warn about chats the bot has never been added
    /// to, then add every argument anyway.
    async fn add_relay_list(
        &self,
        chat: ChatId,
        list: ListKind,
        noun: &str,
        args: &[&str],
    ) -> Result<Outcome> {
        if !auth::is_admin(self.store.as_ref(), chat).await? {
            return Ok(Outcome::silent());
        }

        let mut out = Outcome::ack();
        for arg in args {
            // Advisory only: errors during this check are ignored.
            let joined = match arg.parse::<ChatId>() {
                Ok(id) => self.store.contains(ListKind::Joined, id).await,
                Err(e) => Err(e),
            };
            if let Ok(false) = joined {
                out.notes
                    .push(format!("Note: seems like bot isn't in the {noun} {arg}"));
            }
        }

        for arg in args {
            self.store.add(list, arg.parse()?).await?;
        }
        Ok(out)
    }

    async fn info(&self, chat: ChatId) -> Result<Outcome> {
        if !auth::is_admin(self.store.as_ref(), chat).await? {
            return Ok(Outcome::silent());
        }

        let admins = self.joined_lines(ListKind::Admins).await?;
        let src = self.joined_lines(ListKind::Sources).await?;
        let dst = self.joined_lines(ListKind::Destinations).await?;

        Ok(Outcome::text(format!(
            "- ADMINS:\n{admins}\n---\n- REPOST FROM:\n{src}\n---\n- REPOST TO:\n{dst}"
        )))
    }

    async fn joined_lines(&self, list: ListKind) -> Result<String> {
        Ok(self
            .store
            .members(list)
            .await?
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    async fn clear(&self, chat: ChatId) -> Result<Outcome> {
        if auth::is_admin(self.store.as_ref(), chat).await? {
            self.store.clear_all().await?;
        }
        // Confirmation is unconditional; only the wipe is admin-gated.
        Ok(Outcome::text(CLEARED))
    }
}
