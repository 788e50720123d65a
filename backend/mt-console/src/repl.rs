use crate::error::{ConsoleError, Result as ConsoleErrorResult};
use crate::input::{HELP, Input, parse_line, resolve_decision};
use crate::output::Printer;

use mt_app::ControllerHandle;

use std::io::Write;

use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Feed `input` lines to the controller and print every view and
/// notification it publishes, until end of input or `quit`.
pub async fn run<R, W>(
    handle: ControllerHandle,
    input: R,
    printer: &mut Printer<W>,
) -> ConsoleErrorResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut views = handle.views();
    let mut notifications = handle.notifications();

    let mut last_printed = views.borrow_and_update().clone();
    printer.view(&last_printed)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                match parse_line(&line) {
                    Ok(Input::Quit) => break,
                    Ok(Input::Empty) => {}
                    Ok(Input::Help) => printer.message(HELP)?,
                    Ok(Input::Send(command)) => handle.send(command).await?,
                    Ok(Input::Decide { card, decision }) => {
                        match resolve_decision(&handle.current_view(), &card, decision) {
                            Ok(command) => handle.send(command).await?,
                            Err(e) => printer.message(&describe(&e))?,
                        }
                    }
                    Err(e) => printer.message(&describe(&e))?,
                }
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                last_printed = views.borrow_and_update().clone();
                printer.view(&last_printed)?;
            }
            changed = notifications.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = notifications.borrow_and_update().clone();
                if let Some(notification) = current {
                    printer.notification(&notification)?;
                }
            }
        }
    }

    // Queued commands still run before the controller stops
    handle.shutdown().await;
    let final_view = views.borrow().clone();
    if final_view != last_printed {
        printer.view(&final_view)?;
    }
    info!("Console session ended");
    Ok(())
}

fn describe(error: &ConsoleError) -> String {
    match error {
        ConsoleError::Input { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
