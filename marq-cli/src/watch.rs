use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use marq_core::{Converter, Options};
use marq_live::Notifier;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use owo_colors::OwoColorize;

/// Watches the input for Markdown changes and re-renders each changed file,
/// broadcasting a change notification when a notifier is attached. Runs
/// until the process is terminated.
pub async fn watch(options: &Options, converter: &Converter, notifier: Option<Notifier>) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut debouncer = new_debouncer(
        Duration::from_millis(300),
        move |res: DebounceEventResult| {
            if let Ok(events) = res {
                for event in events {
                    // Only Markdown events reach the handler
                    if is_markdown(&event.path) {
                        let _ = tx.blocking_send(event.path);
                    }
                }
            }
        },
    )?;

    let mode = if options.single {
        RecursiveMode::NonRecursive
    } else {
        RecursiveMode::Recursive
    };
    debouncer.watcher().watch(&options.input, mode)?;
    println!(
        "{}",
        format!("Watching for changes in: {}", options.input.display()).blue()
    );

    // The watcher reports absolute paths; resolve the input root once so
    // destinations mirror batch conversion. In single mode the root is the
    // file's containing directory.
    let input_root = options
        .input
        .canonicalize()
        .unwrap_or_else(|_| options.input.clone());
    let source_root = if options.single {
        input_root
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(input_root)
    } else {
        input_root
    };

    while let Some(path) = rx.recv().await {
        println!(
            "{}",
            format!("Detected change in: {}", path.display()).blue()
        );

        let dest = Converter::dest_for(&source_root, &options.output, &path);
        if let Err(e) = converter.convert_file(&path, &dest) {
            eprintln!(
                "{}",
                format!("Failed to convert {}: {}", path.display(), e).red()
            );
            continue;
        }
        println!("{}", format!("Converted: {}", dest.display()).green());

        if let Some(notifier) = &notifier {
            let name = output_name(&dest);
            println!(
                "{}",
                format!("Notifying clients about changes in {}", name).blue()
            );
            notifier.file_changed(&name);
        }
    }

    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    path.extension().map(|ext| ext == "md").unwrap_or(false)
}

fn output_name(dest: &Path) -> String {
    dest.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
