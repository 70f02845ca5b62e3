use anyhow::Result;
use std::collections::HashMap;
use team_board::core::{BoardStore, ResponseLog};
use team_board::{
    BoardConfig, BoardEngine, BoardPipeline, EditEvent, LocalStorage, ResponseFile,
    TriggerDispatcher, TriggerEvent, XlsxBoardStore,
};
use tempfile::TempDir;

type Dispatcher =
    TriggerDispatcher<BoardPipeline<ResponseFile<LocalStorage>, XlsxBoardStore<LocalStorage>>>;

fn dispatcher(dir: &TempDir) -> Dispatcher {
    let mut config = BoardConfig::default();
    config.triggers.edit_debounce_ms = 5;

    let base = dir.path().display().to_string();
    let source = ResponseFile::open(
        LocalStorage::new(base.clone()),
        "responses.csv",
        &config.sheets.responses,
    );
    let store = XlsxBoardStore::new(LocalStorage::new(format!("{}/output", base)));
    let pipeline = BoardPipeline::with_seed(source, store, config.clone(), 42);
    TriggerDispatcher::new(BoardEngine::new(pipeline), &config)
}

fn edit(sheet: &str, row: u32) -> TriggerEvent {
    TriggerEvent::Edit(EditEvent {
        sheet: sheet.to_string(),
        row,
    })
}

#[tokio::test]
async fn test_manual_rebuild_runs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("responses.csv"), "Name\nAnn\nBo\nCy\n")?;

    let summary = dispatcher(&temp_dir)
        .dispatch(TriggerEvent::Manual)
        .await?
        .expect("manual trigger always rebuilds");
    assert_eq!(summary.respondents, 3);
    assert_eq!(summary.groups, 2);

    Ok(())
}

#[tokio::test]
async fn test_edit_guards_skip_rebuild() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("responses.csv"), "Name\nAnn\n")?;
    let dispatcher = dispatcher(&temp_dir);

    assert!(dispatcher.dispatch(edit("Form Responses 1", 1)).await?.is_none());
    assert!(dispatcher.dispatch(edit("Board", 3)).await?.is_none());
    assert!(!temp_dir.path().join("output").exists());

    let summary = dispatcher.dispatch(edit("Form Responses 1", 2)).await?;
    assert_eq!(summary.map(|s| s.respondents), Some(1));

    Ok(())
}

#[tokio::test]
async fn test_form_submit_appends_and_rebuilds() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("responses.csv"),
        "Timestamp,Email Address,Name\n1/1/2025 9:00:00,ann@x.io,Ann\n",
    )?;
    let dispatcher = dispatcher(&temp_dir);

    let source = dispatcher.engine().pipeline().source();
    let log = source.as_log().expect("csv source accepts submissions");

    let mut fields = HashMap::new();
    fields.insert("name".to_string(), "Bo".to_string());
    fields.insert("email".to_string(), "bo@x.io".to_string());
    assert_eq!(log.append_response(&fields).await?, 3);

    let summary = dispatcher
        .dispatch(TriggerEvent::FormSubmit)
        .await?
        .expect("submission rebuilds");
    assert_eq!(summary.respondents, 2);

    let plan = dispatcher.engine().pipeline().store().read_board().await?;
    let names: Vec<String> = plan
        .board
        .grid()
        .map(|g| g.columns.iter().flat_map(|c| c.members.clone()).collect())
        .unwrap_or_default();
    assert!(names.contains(&"Bo".to_string()));
    assert!(names.contains(&"Ann".to_string()));

    Ok(())
}
