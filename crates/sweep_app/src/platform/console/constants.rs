pub const PROMPT: &str = "sweep> ";
pub const CONFIRM_PROMPT: &str = "confirm [y/N]> ";

pub const PROBE_LIMIT: usize = 3;

pub const HELP: &str = "\
Commands:
  mode                 toggle bulk mode
  filter <text>        filter by title or channel (no text clears)
  range <spec>         filter by index: 5, 1-10, 5-, -20 (no spec clears)
  clear-filters        drop both filters
  list                 show visible items
  select-all           select every visible item
  deselect-all         deselect every visible item
  toggle <index|id>    flip one item's selection
  delete-selected      remove the selected items
  delete-all           remove every visible item
  cancel               stop a running removal after the current item
  status               bulk mode, counts and removal progress
  rescan               re-read the playlist page
  stats                removals today and overall
  probe                inspect the first items without clicking
  help                 this text
  quit                 exit
JSON lines such as {\"type\":\"GET_STATUS\"} are answered as controller commands.";
