//! Store example driving the playground state with actions

use playground_store::state::{Chapter, EditorTab, Variant};
use playground_store::{Action, AppState, Store};

fn main() {
    println!("=== Store Example ===\n");

    let store = Store::new(AppState::default());

    // Subscribe to state changes; the handle must stay alive to keep listening
    let subscription = store.subscribe(|state: &AppState| {
        let playground = &state.workspaces.playground;
        println!(
            "State updated! {} tab(s), active {:?}, {} {}",
            playground.editor_tabs.len(),
            playground.active_editor_tab_index,
            playground.context.chapter,
            playground.context.variant.as_str(),
        );
    });

    println!("Opening a second tab...");
    store.dispatch(Action::AddEditorTab(EditorTab::new("display(\"hello\");")));

    println!("\nSwitching language...");
    store.dispatch(Action::ChangeChapter(Chapter::SOURCE_3));
    store.dispatch(Action::ChangeVariant(Variant::Lazy));

    println!("\nEditing the first tab...");
    store.dispatch(Action::UpdateEditorValue {
        index: 0,
        value: "const x = 1;".to_string(),
    });

    subscription.dispose();
    println!("\nUnsubscribed, this change is silent");
    store.dispatch(Action::SetAutorun(true));

    println!(
        "\nFinal playground: {:#?}",
        store.read(|s| s.workspaces.playground.clone())
    );
}
