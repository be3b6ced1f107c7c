//! The built-in default configuration.

use crate::config::Configuration;
use crate::parser::parse_with_base;
use std::sync::LazyLock;

/// The defaults, expressed in the configuration language itself. Every
/// parse of user text starts from the result of parsing this.
pub const DEFAULT_CONFIG_TEXT: &str = "\
# Leave insert mode
imap C-q Normal

# Normal mode: entering insertion and selection
nmap i Insert
nmap a Right Insert
nmap I BackwardWord Insert
nmap A ForwardWord Insert
nmap v Visual

# Normal mode: movement
nmap h Left
nmap j Down
nmap k Up
nmap l Right
nmap b BackwardWord
nmap w ForwardWord
nmap e ForwardWord
nmap ^ LineStart
nmap $ LineEnd

# Normal mode: editing
nmap x Delete
nmap X DeleteWord
nmap z Backspace
nmap Z BackspaceWord
nmap u Undo
nmap U Redo
nmap p Paste

# Normal mode: operators
nmap d operator Cut
nmap c operator Cut Insert
nmap y operator Copy Right

# Visual mode
xmap q Normal Right
xmap h SelectLeft
xmap j SelectDown
xmap k SelectUp
xmap l SelectRight
xmap b SelectBackwardWord
xmap w SelectForwardWord
xmap e SelectForwardWord
xmap ^ SelectLineStart
xmap $ SelectLineEnd
xmap i Left Insert
xmap a Right Insert
xmap c Cut Insert
xmap d Cut Normal
xmap y Copy

# Motion mode
omap h SelectLeft
omap j SelectDown
omap k SelectUp
omap l SelectRight
omap b SelectBackwardWord
omap w SelectForwardWord
omap e SelectForwardWord
omap ^ SelectLineStart
omap $ SelectLineEnd
omap d LineStart SelectLineEnd
omap c LineStart SelectLineEnd
omap y LineStart SelectLineEnd
omap W BackwardWord SelectForwardWord
";

static DEFAULT: LazyLock<Configuration> = LazyLock::new(|| {
    parse_with_base(DEFAULT_CONFIG_TEXT, Configuration::empty())
        .expect("built-in default configuration parses")
});

/// The parsed built-in defaults.
pub fn default_configuration() -> &'static Configuration {
    &DEFAULT
}
