//! End-to-end scenarios: configuration text in, key events through the
//! manager, injected key sequences and mode transitions out.

use fieldvim_keys::{Mode, Platform};
use fieldvim_testing::Scenario;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test(start_paused = true)]
async fn operator_then_motion_runs_motion_first() {
    init_tracing();
    let mut scenario = Scenario::builder()
        .config("set DefaultMode normal\nnmap d operator Cut\nmap w ForwardWord")
        .build()
        .unwrap();

    assert_eq!(scenario.mode(), Mode::Normal);

    scenario.press("d").await;
    assert_eq!(scenario.mode(), Mode::Motion);

    scenario.press("w").await;
    assert_eq!(scenario.mode(), Mode::Normal);

    // The motion's keys are injected first, the operator body after.
    assert_eq!(scenario.injected(), vec!["C-ArrowRight", "C-x"]);
    assert_eq!(
        scenario.host().mode_log(),
        vec![Mode::Normal, Mode::Motion, Mode::Normal]
    );
}

#[tokio::test(start_paused = true)]
async fn line_wise_delete_with_default_bindings() {
    init_tracing();
    let mut scenario = Scenario::builder()
        .config("set DefaultMode normal")
        .build()
        .unwrap();

    // `dd`: operator, then the motion map's line-wise `d`.
    scenario.press_all(&["d", "d"]).await;
    assert_eq!(scenario.mode(), Mode::Normal);
    assert_eq!(scenario.injected(), vec!["Home", "S-End", "C-x"]);
}

#[tokio::test(start_paused = true)]
async fn repeat_count_multiplies_command() {
    init_tracing();
    let mut scenario = Scenario::builder()
        .config("set DefaultMode normal")
        .build()
        .unwrap();

    scenario.press_all(&["3", "4", "h"]).await;
    assert_eq!(scenario.injected().len(), 34);
    assert!(scenario.injected().iter().all(|k| k == "ArrowLeft"));
}

#[tokio::test(start_paused = true)]
async fn max_repeat_caps_execution_count() {
    init_tracing();
    let mut scenario = Scenario::builder()
        .config("set DefaultMode normal\nset MaxRepeat 5")
        .build()
        .unwrap();

    scenario.press_all(&["9", "9", "h"]).await;
    assert_eq!(scenario.injected().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn visual_block_insertions_swallow_unbound_printables() {
    init_tracing();
    let mut scenario = Scenario::builder()
        .config("set DefaultMode visual\nset VisualBlockInsertions true")
        .build()
        .unwrap();

    use fieldvim_engine::KeyDisposition;
    assert_eq!(scenario.press("g").await, KeyDisposition::Block);
    assert!(scenario.injected().is_empty());
    assert_eq!(scenario.mode(), Mode::Visual);
}

#[tokio::test(start_paused = true)]
async fn unknown_command_reports_line_and_token() {
    init_tracing();
    let err = Scenario::builder()
        .config("# settings\nset MaxRepeat 5\nnmap q Bogus")
        .build()
        .unwrap_err();

    assert_eq!(err.line, 3);
    let message = err.to_string();
    assert!(message.contains("Line 3"), "{message}");
    assert!(message.contains("Bogus"), "{message}");
}

#[tokio::test(start_paused = true)]
async fn apple_platform_uses_apple_shortcuts() {
    init_tracing();
    let mut scenario = Scenario::builder()
        .config("set DefaultMode visual")
        .platform(Platform::Apple)
        .build()
        .unwrap();

    // Visual `c` is Cut + Insert; Cut is Backspace on Apple.
    scenario.press("c").await;
    assert_eq!(scenario.injected(), vec!["Backspace"]);
    assert_eq!(scenario.mode(), Mode::Insert);
}

#[tokio::test(start_paused = true)]
async fn failed_injections_do_not_stall_the_pipeline() {
    init_tracing();
    let mut scenario = Scenario::builder()
        .config("set DefaultMode normal")
        .build()
        .unwrap();

    scenario.host().fail_injections(true);
    use fieldvim_engine::KeyDisposition;
    // `a` is Right + Insert: the injection fails but the mode switch still
    // lands and the manager keeps accepting keys.
    assert_eq!(scenario.press("a").await, KeyDisposition::Handled);
    assert_eq!(scenario.mode(), Mode::Insert);
    assert!(scenario.injected().is_empty());

    scenario.host().fail_injections(false);
    scenario.press("C-q").await;
    assert_eq!(scenario.mode(), Mode::Normal);
    scenario.press("h").await;
    assert_eq!(scenario.injected(), vec!["ArrowLeft"]);
}

#[tokio::test(start_paused = true)]
async fn selection_collapse_from_cut_keeps_commanded_mode() {
    init_tracing();
    let mut scenario = Scenario::builder()
        .config("set VisualModeOnSelect true")
        .build()
        .unwrap();

    // Selecting flips insert into visual.
    scenario.host().select(2, 7);
    scenario.manager_mut().on_selection_change();
    assert_eq!(scenario.mode(), Mode::Visual);

    // Visual `d` cuts (collapsing the selection) and switches to normal.
    // The collapse is self-inflicted and must not re-derive insert mode.
    scenario.host().collapse_selection_on("C-x");
    scenario.press("d").await;
    assert_eq!(scenario.mode(), Mode::Normal);
}

#[tokio::test(start_paused = true)]
async fn exit_selection_collapses_to_the_directional_edge() {
    init_tracing();
    let mut scenario = Scenario::builder()
        .config("set DefaultMode normal\nnmap s ExitSelection")
        .selected(7, 2)
        .build()
        .unwrap();

    // A backward selection collapses onto its left edge.
    scenario.press("s").await;
    assert_eq!(scenario.injected(), vec!["ArrowLeft"]);
}

#[tokio::test(start_paused = true)]
async fn reconfiguration_swaps_bindings_wholesale() {
    init_tracing();
    let mut scenario = Scenario::builder()
        .config("set DefaultMode normal")
        .build()
        .unwrap();

    scenario.press("h").await;
    assert_eq!(scenario.host().take_injected(), vec!["ArrowLeft"]);

    scenario
        .manager_mut()
        .update_config("set DefaultMode normal\nunmapAll\nnmap h Up")
        .unwrap();

    scenario.press("h").await;
    assert_eq!(scenario.host().take_injected(), vec!["ArrowUp"]);

    // Every other default binding is gone after unmapAll.
    scenario.press("j").await;
    assert!(scenario.host().take_injected().is_empty());
}

#[tokio::test(start_paused = true)]
async fn site_overrides_select_by_location() {
    init_tracing();
    let config = "set MaxRepeat 9\nsetOn MaxRepeat 2 docs\\.example\\.com/.*";

    let scenario = Scenario::builder()
        .config(config)
        .location("https://docs.example.com/sheet/1")
        .build()
        .unwrap();
    assert_eq!(scenario.manager().settings().max_repeat(), Some(2));

    let scenario = Scenario::builder()
        .config(config)
        .location("https://example.com/")
        .build()
        .unwrap();
    assert_eq!(scenario.manager().settings().max_repeat(), Some(9));
}

#[tokio::test(start_paused = true)]
async fn insert_escape_binding_leaves_insert_mode() {
    init_tracing();
    let mut scenario = Scenario::builder().build().unwrap();

    assert_eq!(scenario.mode(), Mode::Insert);
    scenario.press("C-q").await;
    assert_eq!(scenario.mode(), Mode::Normal);

    scenario.press("i").await;
    assert_eq!(scenario.mode(), Mode::Insert);
}
