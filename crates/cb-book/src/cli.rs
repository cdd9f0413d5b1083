//! CLI (Command Line Interface) mode
//!
//! Interactive REPL over the address book, plus a non-interactive execute
//! mode for one-shot commands.

use cb_contacts::SharedContactRegistry;
use nu_ansi_term::{Color, Style};
use reedline::{
    ColumnarMenu, Completer, DefaultHinter, EditCommand, Emacs, KeyCode, KeyModifiers,
    Keybindings, MenuBuilder, Prompt, Reedline, ReedlineEvent, ReedlineMenu, Signal, Suggestion,
    default_emacs_keybindings,
};
use std::borrow::Cow;
use tracing::{debug, info};

use crate::command::{ADD_USAGE, COMMANDS, CommandKind, Parsed};
use crate::error::BookError;
use crate::outcome::{self, Outcome};

/// Command completer for reedline
#[derive(Clone)]
pub struct CommandCompleter {
    commands: Vec<(&'static str, &'static str)>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.to_vec(),
        }
    }
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for CommandCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        if !line.starts_with('/') {
            return Vec::new();
        }

        self.commands
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(line))
            .map(|(cmd, desc)| Suggestion {
                value: cmd.to_string(),
                description: Some(desc.to_string()),
                extra: None,
                span: reedline::Span::new(0, pos),
                append_whitespace: true,
                style: None,
            })
            .collect()
    }
}

/// Prompt with a coloured label, used for commands and field input
struct ColoredPrompt {
    label: Cow<'static, str>,
    style: Style,
}

impl ColoredPrompt {
    fn command() -> Self {
        Self {
            label: Cow::Borrowed("> "),
            style: Color::Cyan.bold(),
        }
    }

    fn field(label: &'static str) -> Self {
        Self {
            label: Cow::Owned(format!("{}: ", label)),
            style: Color::Yellow.normal(),
        }
    }
}

impl Prompt for ColoredPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(self.style.paint(self.label.as_ref()).to_string())
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: reedline::PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: reedline::PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
}

/// Name of the slash-command completion menu
const COMMAND_MENU: &str = "command_menu";

/// Answers collected for a prompted command
#[derive(Debug, PartialEq, Eq)]
enum FieldInput {
    Values(Vec<String>),
    Cancelled,
    Quit,
}

/// What the REPL does after one input line
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    /// Nothing to print
    Skip,
    /// A mutation succeeded
    Success(String),
    Info(String),
    Error(String),
    Quit,
}

/// Run CLI interactive mode
pub async fn run_cli(registry: SharedContactRegistry, banner: bool) -> anyhow::Result<()> {
    info!("Starting CLI mode with {} contacts", registry.len().await);

    if banner {
        print_welcome();
    }

    let menu = Box::new(
        ColumnarMenu::default()
            .with_name(COMMAND_MENU)
            .with_columns(1)
            .with_column_width(Some(40))
            .with_only_buffer_difference(false),
    );

    let hinter = DefaultHinter::default().with_style(Style::new().dimmed());

    let mut line_editor = Reedline::create()
        .with_completer(Box::new(CommandCompleter::new()))
        .with_menu(ReedlineMenu::EngineCompleter(menu))
        .with_hinter(Box::new(hinter))
        .with_edit_mode(Box::new(Emacs::new(keybindings())));

    let prompt = ColoredPrompt::command();

    loop {
        let line = match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => line,
            Ok(Signal::CtrlC) => {
                println!("^C");
                continue;
            }
            Ok(Signal::CtrlD) => {
                println!("\n{}\n", Outcome::Exit.render());
                break;
            }
            Err(err) => {
                print_error(&err.to_string());
                break;
            }
        };

        let reply = handle_line(&registry, &line, |kind| {
            read_fields(kind, |label| line_editor.read_line(&ColoredPrompt::field(label)))
        })
        .await;

        match reply {
            Reply::Skip => {}
            Reply::Success(text) => println!("\n{}\n", Color::Green.paint(text)),
            Reply::Info(text) => println!("\n{}\n", text),
            Reply::Error(message) => print_error(&message),
            Reply::Quit => {
                println!("\n{}\n", Outcome::Exit.render());
                break;
            }
        }
    }

    Ok(())
}

/// Parse and run one input line
///
/// `ask` is called only when the command's arguments are missing.
async fn handle_line<F>(registry: &SharedContactRegistry, line: &str, ask: F) -> Reply
where
    F: FnOnce(CommandKind) -> FieldInput,
{
    let command = match Parsed::parse(line) {
        Ok(Parsed::Empty) => return Reply::Skip,
        Ok(Parsed::Ready(command)) => command,
        Ok(Parsed::NeedsInput(kind)) => match ask(kind) {
            FieldInput::Values(values) => match kind.build(&values) {
                Ok(command) => command,
                Err(e) => return Reply::Error(e.to_string()),
            },
            FieldInput::Cancelled => return Reply::Skip,
            FieldInput::Quit => return Reply::Quit,
        },
        Err(e) => return Reply::Error(e.to_string()),
    };

    debug!("Executing command: {:?}", command);

    match outcome::execute(command, registry).await {
        Ok(Outcome::Exit) => Reply::Quit,
        Ok(outcome @ (Outcome::Added { .. } | Outcome::Deleted { .. })) => {
            Reply::Success(outcome.render())
        }
        Ok(outcome) => Reply::Info(outcome.render()),
        Err(e) => Reply::Error(e.to_string()),
    }
}

/// Ask for each field of a command, one whole line per field
fn read_fields<R>(kind: CommandKind, mut read: R) -> FieldInput
where
    R: FnMut(&'static str) -> std::io::Result<Signal>,
{
    let mut values = Vec::with_capacity(kind.fields().len());

    for &label in kind.fields() {
        match read(label) {
            Ok(Signal::Success(value)) => values.push(value),
            Ok(Signal::CtrlC) => {
                println!("^C");
                return FieldInput::Cancelled;
            }
            Ok(Signal::CtrlD) => return FieldInput::Quit,
            Err(err) => {
                print_error(&err.to_string());
                return FieldInput::Cancelled;
            }
        }
    }

    FieldInput::Values(values)
}

/// Emacs keybindings plus the slash-command menu
///
/// `/` is inserted and opens the menu; Tab opens the menu or moves through it.
fn keybindings() -> Keybindings {
    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Char('/'),
        ReedlineEvent::Multiple(vec![
            ReedlineEvent::Edit(vec![EditCommand::InsertChar('/')]),
            ReedlineEvent::Menu(COMMAND_MENU.to_string()),
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu(COMMAND_MENU.to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Enter, ReedlineEvent::Enter);
    keybindings
}

fn print_error(message: &str) {
    eprintln!("\n{}\n", Color::Red.paint(format!("X {}", message)));
}

/// Print welcome message
fn print_welcome() {
    println!();
    println!("=== Contact Book ===");
    println!("{}", outcome::help_text());
    println!();
    println!("Type a command or its menu number. Commands without arguments ask for them.");
    println!();
}

// ============================================================================
// Non-interactive mode
// ============================================================================

/// Run a single command and print its result
///
/// Returns `false` when the command failed; the error is printed to stderr.
///
/// ```bash
/// contact-book --execute "/search ali"
/// contact-book -e "/get 1" --json
/// ```
pub async fn run_execute(registry: SharedContactRegistry, input: &str, json: bool) -> bool {
    let result = match Parsed::parse(input) {
        Ok(Parsed::Ready(command)) => outcome::execute(command, &registry).await,
        Ok(Parsed::Empty) => Err(BookError::Usage("--execute <command>")),
        Ok(Parsed::NeedsInput(kind)) => Err(BookError::Usage(usage_for(kind))),
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) if json => {
            println!("{}", outcome.to_json());
            true
        }
        Ok(outcome) => {
            println!("{}", outcome.render());
            true
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            false
        }
    }
}

fn usage_for(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::Add => ADD_USAGE,
        CommandKind::Get => "/get <id>",
        CommandKind::Delete => "/delete <id>",
        CommandKind::SearchName => "/search <name>",
        CommandKind::SearchEmail => "/email <email>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_contacts::{ContactsError, LookupKey};
    use crossterm::event::{Event, KeyEvent};
    use reedline::{EditMode, ReedlineRawEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> ReedlineRawEvent {
        ReedlineRawEvent::try_from(Event::Key(KeyEvent::new(code, modifiers)))
            .expect("key events convert")
    }

    fn press(code: KeyCode) -> ReedlineEvent {
        Emacs::new(keybindings()).parse_event(key(code, KeyModifiers::NONE))
    }

    fn answers(values: &[&str]) -> FieldInput {
        FieldInput::Values(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_slash_is_inserted_and_opens_menu() {
        assert_eq!(
            press(KeyCode::Char('/')),
            ReedlineEvent::Multiple(vec![
                ReedlineEvent::Edit(vec![EditCommand::InsertChar('/')]),
                ReedlineEvent::Menu(COMMAND_MENU.to_string()),
            ])
        );
    }

    #[test]
    fn test_plain_keys_still_edit() {
        assert_eq!(
            press(KeyCode::Char('a')),
            ReedlineEvent::Edit(vec![EditCommand::InsertChar('a')])
        );
        assert_eq!(
            press(KeyCode::Backspace),
            ReedlineEvent::Edit(vec![EditCommand::Backspace])
        );
        assert_ne!(press(KeyCode::Left), ReedlineEvent::None);
        assert_ne!(press(KeyCode::Home), ReedlineEvent::None);
        assert_eq!(press(KeyCode::Enter), ReedlineEvent::Enter);
    }

    #[test]
    fn test_tab_opens_command_menu() {
        assert_eq!(
            press(KeyCode::Tab),
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMMAND_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ])
        );
    }

    #[test]
    fn test_ctrl_keys_signal() {
        let mut emacs = Emacs::new(keybindings());
        assert_eq!(
            emacs.parse_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            ReedlineEvent::CtrlC
        );
        assert_eq!(
            emacs.parse_event(key(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            ReedlineEvent::CtrlD
        );
    }

    #[tokio::test]
    async fn test_line_add_prints_success() {
        let registry = SharedContactRegistry::new();
        let reply = handle_line(&registry, "/add Jean Paul | jp@x.com", |_| {
            panic!("complete command must not prompt")
        })
        .await;

        assert_eq!(reply, Reply::Success("Contact added (id: 0)".to_string()));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_line_prompts_for_missing_fields() {
        let registry = SharedContactRegistry::new();
        let reply = handle_line(&registry, "1", |kind| {
            assert_eq!(kind, CommandKind::Add);
            answers(&["  Alice Dupont ", "alice@email.com", ""])
        })
        .await;

        assert_eq!(reply, Reply::Success("Contact added (id: 0)".to_string()));
        let contact = registry.get(0).await.expect("contact was added");
        assert_eq!(contact.name, "  Alice Dupont ");
        assert_eq!(contact.phone, "");
    }

    #[tokio::test]
    async fn test_line_prompt_cancel_and_quit() {
        let registry = SharedContactRegistry::new();

        let reply = handle_line(&registry, "/add", |_| FieldInput::Cancelled).await;
        assert_eq!(reply, Reply::Skip);

        let reply = handle_line(&registry, "/get", |_| FieldInput::Quit).await;
        assert_eq!(reply, Reply::Quit);

        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_line_prompted_id_must_be_numeric() {
        let registry = SharedContactRegistry::new();
        let reply = handle_line(&registry, "/delete", |_| answers(&["abc"])).await;

        assert!(
            matches!(&reply, Reply::Error(message) if message.contains("abc")),
            "unexpected reply: {:?}",
            reply
        );
    }

    #[tokio::test]
    async fn test_line_delete_and_not_found() {
        let registry = SharedContactRegistry::new();
        registry.add("Alice Dupont", "alice@email.com", "0601020304").await;

        let reply = handle_line(&registry, "/delete 0", |_| FieldInput::Cancelled).await;
        assert_eq!(reply, Reply::Success("Contact 0 deleted".to_string()));

        let reply = handle_line(&registry, "/get 0", |_| FieldInput::Cancelled).await;
        assert_eq!(
            reply,
            Reply::Error(ContactsError::NotFound(LookupKey::Id(0)).to_string())
        );
    }

    #[tokio::test]
    async fn test_line_info_skip_and_exit() {
        let registry = SharedContactRegistry::new();

        assert_eq!(
            handle_line(&registry, "/list", |_| FieldInput::Cancelled).await,
            Reply::Info("No contacts.".to_string())
        );
        assert_eq!(
            handle_line(&registry, "   ", |_| FieldInput::Cancelled).await,
            Reply::Skip
        );
        assert_eq!(
            handle_line(&registry, "/exit", |_| FieldInput::Cancelled).await,
            Reply::Quit
        );
        assert_eq!(
            handle_line(&registry, "7", |_| FieldInput::Cancelled).await,
            Reply::Quit
        );
        assert!(matches!(
            handle_line(&registry, "/bogus", |_| FieldInput::Cancelled).await,
            Reply::Error(_)
        ));
    }

    #[test]
    fn test_read_fields_collects_every_answer() {
        let mut lines = vec!["Carol", "carol@x.com", "555"].into_iter();
        let mut asked = Vec::new();

        let input = read_fields(CommandKind::Add, |label| {
            asked.push(label);
            Ok(Signal::Success(lines.next().unwrap_or_default().to_string()))
        });

        assert_eq!(input, answers(&["Carol", "carol@x.com", "555"]));
        assert_eq!(asked, CommandKind::Add.fields());
    }

    #[test]
    fn test_read_fields_ctrl_c_cancels_and_ctrl_d_quits() {
        assert_eq!(
            read_fields(CommandKind::Add, |_| Ok(Signal::CtrlC)),
            FieldInput::Cancelled
        );
        assert_eq!(
            read_fields(CommandKind::Get, |_| Ok(Signal::CtrlD)),
            FieldInput::Quit
        );
        assert_eq!(
            read_fields(CommandKind::Get, |_| Err(std::io::Error::other("closed"))),
            FieldInput::Cancelled
        );
    }

    #[test]
    fn test_add_usage_is_shared() {
        assert_eq!(usage_for(CommandKind::Add), ADD_USAGE);
    }

    #[test]
    fn test_completer_filters_by_prefix() {
        let mut completer = CommandCompleter::new();
        let values: Vec<String> = completer
            .complete("/e", 2)
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(values, vec!["/email".to_string(), "/exit".to_string()]);
    }

    #[test]
    fn test_completer_ignores_plain_text() {
        let mut completer = CommandCompleter::new();
        assert!(completer.complete("alice", 5).is_empty());
    }

    #[test]
    fn test_completer_lists_all_on_slash() {
        let mut completer = CommandCompleter::new();
        assert_eq!(completer.complete("/", 1).len(), COMMANDS.len());
    }

    #[tokio::test]
    async fn test_execute_mode_success_and_failure() {
        let registry = SharedContactRegistry::new();
        registry.add("Alice Dupont", "alice@email.com", "0601020304").await;

        assert!(run_execute(registry.clone(), "/get 0", false).await);
        assert!(run_execute(registry.clone(), "/list", true).await);
        assert!(!run_execute(registry.clone(), "/get 99", false).await);
        assert!(!run_execute(registry.clone(), "/get", false).await);
        assert!(!run_execute(registry.clone(), "", false).await);
        assert!(!run_execute(registry, "/bogus", false).await);
    }

    #[tokio::test]
    async fn test_execute_mode_mutates_registry() {
        let registry = SharedContactRegistry::new();
        assert!(run_execute(registry.clone(), "/add Jean Paul | jp@x.com", false).await);

        let contacts = registry.list().await;
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Jean Paul");
        assert_eq!(contacts[0].email, "jp@x.com");
    }
}
