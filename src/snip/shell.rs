//! # zsh Integration
//!
//! `zsh-snip init zsh` prints a script that defines two ZLE widgets and binds
//! them. The widgets hand the line editor's buffer to the binary and apply what
//! comes back:
//!
//! - save: `zsh-snip save -- "$BUFFER"`, then clears the buffer on success
//! - search: `zsh-snip search --output <tmpfile>`; the file holds the action on
//!   its first line (`insert` or `execute`) and the command text after it
//!
//! The binary runs with the terminal as stdin/stdout so the finder and the
//! editor can draw; results travel through the temp file instead of stdout.
//!
//! With zsh-abbr loaded, snippet abbreviations are registered at startup and
//! re-synced after each widget run. Without it, a shell whose snippets declare
//! abbreviations gets one notice on stderr.

/// Marker written as the first line of search output.
pub const ACTION_INSERT: &str = "insert";
pub const ACTION_EXECUTE: &str = "execute";

const ZSH_TEMPLATE: &str = r#"# zsh-snip integration. Load with: eval "$(zsh-snip init zsh)"
typeset -g ZSH_SNIP_BIN=${ZSH_SNIP_BIN:-@BIN@}

_zsh_snip_save() {
  [[ -z ${BUFFER//[[:space:]]/} ]] && { zle -M "zsh-snip: nothing to save"; return 1 }
  zle -I
  if $ZSH_SNIP_BIN save -- "$BUFFER" </dev/tty >/dev/tty; then
    BUFFER=""
    CURSOR=0
    _zsh_snip_abbr_sync
  fi
  zle reset-prompt
}

_zsh_snip_search() {
  local out action
  out=$(mktemp "${TMPDIR:-/tmp}/zsh-snip.XXXXXX") || return 1
  zle -I
  $ZSH_SNIP_BIN search --query "$LBUFFER" --output "$out" </dev/tty >/dev/tty
  if [[ -s $out ]]; then
    action=$(head -n 1 -- "$out")
    BUFFER=$(tail -n +2 -- "$out")
    CURSOR=${#BUFFER}
  fi
  command rm -f -- "$out"
  _zsh_snip_abbr_sync
  zle reset-prompt
  [[ $action == @EXECUTE@ ]] && zle accept-line
  return 0
}

zle -N zsh-snip-save _zsh_snip_save
zle -N zsh-snip-search _zsh_snip_search
bindkey "${ZSH_SNIP_SAVE_KEY:-^X^S}" zsh-snip-save
bindkey "${ZSH_SNIP_SEARCH_KEY:-^X^X}" zsh-snip-search

# Keys registered by the last sync; erased before the next one.
typeset -ga _zsh_snip_abbr_keys

_zsh_snip_abbr_sync() {
  (( $+functions[abbr] )) || return 0
  local key
  for key in $_zsh_snip_abbr_keys; do
    abbr erase --session --quiet "$key" 2>/dev/null
  done
  eval "$($ZSH_SNIP_BIN abbr load 2>/dev/null)"
  _zsh_snip_abbr_keys=(${${(f)"$($ZSH_SNIP_BIN abbr list 2>/dev/null)"}%%$'\t'*})
}

if (( $+functions[abbr] )); then
  _zsh_snip_abbr_sync
elif (( ! ${+_ZSH_SNIP_ABBR_WARNED} )) && [[ -n $($ZSH_SNIP_BIN abbr list 2>/dev/null) ]]; then
  typeset -g _ZSH_SNIP_ABBR_WARNED=1
  print -u2 "zsh-snip: snippets declare abbreviations but zsh-abbr is not loaded"
fi
"#;

/// The zsh integration script, calling the binary at `bin`.
pub fn zsh_script(bin: &str) -> String {
    ZSH_TEMPLATE
        .replace("@BIN@", &shell_words::quote(bin))
        .replace("@EXECUTE@", ACTION_EXECUTE)
}

/// Search output as read by the widget: action line, then the command text.
pub fn search_output(action: &str, command: &str) -> String {
    format!("{}\n{}", action, command)
}

/// Wraps a body so positional arguments bind inside it:
/// `() {\n<body>\n} 'a' 'b'`.
pub fn bind_arguments(body: &str, args: &[String]) -> String {
    if args.is_empty() {
        return body.to_string();
    }
    let quoted: Vec<String> = args
        .iter()
        .map(|arg| shell_words::quote(arg).into_owned())
        .collect();
    format!("() {{\n{}\n}} {}", body, quoted.join(" "))
}
