use super::constants::{AREAS_HEADER, CONFIRM_OPTIONS_ROW, CONFIRM_PROMPT, CONFIRM_PROMPT_ROW, HEADER_ROW};
use super::{Action, ConfirmChoice, Transition, View, begin, draw_area_footer};
use crate::gesture::Gesture;
use crate::ui::DisplaySink;

const OPTIONS: [ConfirmChoice; 2] = [ConfirmChoice::Yes, ConfirmChoice::No];

pub(super) fn handle(gesture: Gesture, choice: ConfirmChoice, proposed: usize, back: View) -> Transition {
    match gesture {
        Gesture::Up | Gesture::Down => Transition::to(View::Confirm {
            choice: choice.toggled(),
            proposed,
        }),
        Gesture::Left => match choice {
            ConfirmChoice::Yes => Transition::with(back, Action::CommitCity(proposed)),
            ConfirmChoice::No => Transition::to(back),
        },
        Gesture::Right => Transition::to(back),
    }
}

pub(super) fn draw<S: DisplaySink>(
    sink: &mut S,
    choice: ConfirmChoice,
    city: &str,
    contrast: u8,
) -> Result<(), S::Error> {
    begin(sink, false, contrast)?;
    sink.draw_text(HEADER_ROW, AREAS_HEADER, false)?;
    sink.draw_text(CONFIRM_PROMPT_ROW, CONFIRM_PROMPT, false)?;
    for (row, option) in (CONFIRM_OPTIONS_ROW..).zip(OPTIONS) {
        sink.draw_text(row, option.label(), option == choice)?;
    }
    draw_area_footer(sink, city)
}
