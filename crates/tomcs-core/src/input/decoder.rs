//! Byte-level decoder for raw terminal input.
//!
//! Recognizes SGR extended mouse reports (`ESC [ < b ; x ; y M|m`), CSI and
//! SS3 cursor keys, control characters, Alt-prefixed keys, and UTF-8 text.
//!
//! A sequence split across two reads is held back and completed by the
//! next chunk. A lone trailing `ESC` is also held, because it may be the
//! start of a sequence; callers turn it into an Escape key with
//! [`InputDecoder::flush`] once no more input arrives.

use super::event::{InputEvent, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MousePhase};

const ESC: u8 = 0x1b;

/// Longest incomplete sequence kept between chunks.
const MAX_PENDING: usize = 32;

/// SGR button bit set for wheel events.
const WHEEL_BIT: u16 = 64;

/// Outcome of decoding at the start of a byte slice.
enum Step {
    /// An event, and how many bytes it consumed.
    Emit(InputEvent, usize),
    /// Bytes that form nothing we recognize.
    Skip(usize),
    /// The slice ends in the middle of a sequence.
    Incomplete,
}

/// Stateful decoder from raw stdin bytes to [`InputEvent`]s.
#[derive(Debug, Default)]
pub struct InputDecoder {
    pending: Vec<u8>,
}

impl InputDecoder {
    /// Creates a decoder with no pending bytes.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Decodes one chunk, in arrival order.
    ///
    /// Malformed sequences are dropped. An incomplete trailing sequence is
    /// kept for the next call, up to a small bound.
    pub fn decode(&mut self, chunk: &[u8]) -> Vec<InputEvent> {
        let mut buf = std::mem::take(&mut self.pending);
        buf.extend_from_slice(chunk);

        let mut events = Vec::new();
        let mut pos = 0;
        while pos < buf.len() {
            match decode_one(&buf[pos..]) {
                Step::Emit(event, consumed) => {
                    events.push(event);
                    pos += consumed;
                }
                Step::Skip(consumed) => {
                    tracing::trace!(bytes = ?&buf[pos..pos + consumed], "dropping unrecognized input");
                    pos += consumed;
                }
                Step::Incomplete => {
                    let rest = &buf[pos..];
                    if rest.len() <= MAX_PENDING {
                        self.pending.extend_from_slice(rest);
                    } else {
                        tracing::debug!(len = rest.len(), "dropping oversized partial sequence");
                    }
                    break;
                }
            }
        }
        events
    }

    /// Whether bytes are held back waiting for the rest of a sequence.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Gives up on the held-back bytes.
    ///
    /// A lone `ESC` becomes an Escape key press; any other partial
    /// sequence is dropped.
    pub fn flush(&mut self) -> Option<InputEvent> {
        let pending = std::mem::take(&mut self.pending);
        if pending == [ESC] {
            Some(InputEvent::Key(KeyEvent::new(KeyCode::Esc)))
        } else {
            if !pending.is_empty() {
                tracing::trace!(bytes = ?pending, "dropping stale partial sequence");
            }
            None
        }
    }
}

fn key(code: KeyCode, consumed: usize) -> Step {
    Step::Emit(InputEvent::Key(KeyEvent::new(code)), consumed)
}

fn decode_one(bytes: &[u8]) -> Step {
    let first = bytes[0];
    match first {
        ESC => decode_escape(bytes),
        b'\r' => key(KeyCode::Enter, 1),
        b'\n' => key(KeyCode::Char('\n'), 1),
        b'\t' => key(KeyCode::Tab, 1),
        0x7f | 0x08 => key(KeyCode::Backspace, 1),
        0x00 => Step::Emit(
            InputEvent::Key(KeyEvent::new(KeyCode::Char(' ')).with_modifiers(Modifiers::CTRL)),
            1,
        ),
        0x01..=0x1a => {
            let letter = char::from(first - 1 + b'a');
            Step::Emit(
                InputEvent::Key(KeyEvent::new(KeyCode::Char(letter)).with_modifiers(Modifiers::CTRL)),
                1,
            )
        }
        0x1c..=0x1f => Step::Skip(1),
        _ => decode_utf8(bytes),
    }
}

fn decode_escape(bytes: &[u8]) -> Step {
    match bytes.get(1) {
        None => Step::Incomplete,
        Some(b'[') => decode_csi(bytes),
        Some(b'O') => match bytes.get(2) {
            None => Step::Incomplete,
            Some(b'A') => key(KeyCode::Up, 3),
            Some(b'B') => key(KeyCode::Down, 3),
            Some(b'C') => key(KeyCode::Right, 3),
            Some(b'D') => key(KeyCode::Left, 3),
            Some(b'H') => key(KeyCode::Home, 3),
            Some(b'F') => key(KeyCode::End, 3),
            Some(_) => Step::Skip(3),
        },
        Some(&ESC) => key(KeyCode::Esc, 1),
        Some(_) => match decode_one(&bytes[1..]) {
            Step::Emit(InputEvent::Key(k), consumed) => Step::Emit(
                InputEvent::Key(k.with_modifiers(Modifiers::ALT)),
                consumed + 1,
            ),
            Step::Emit(_, consumed) | Step::Skip(consumed) => Step::Skip(consumed + 1),
            Step::Incomplete => Step::Incomplete,
        },
    }
}

fn decode_csi(bytes: &[u8]) -> Step {
    match bytes.get(2) {
        None => return Step::Incomplete,
        Some(b'<') => return decode_sgr_mouse(bytes),
        Some(_) => {}
    }

    let mut end = 2;
    while let Some(&b) = bytes.get(end) {
        if (0x40..=0x7e).contains(&b) {
            break;
        }
        if !(0x20..=0x3f).contains(&b) {
            return Step::Skip(end);
        }
        end += 1;
    }
    if end >= bytes.len() {
        return Step::Incomplete;
    }

    let params = &bytes[2..end];
    let consumed = end + 1;
    let code = match bytes[end] {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'Z' => KeyCode::BackTab,
        b'~' => match param(params, 0) {
            Some(1 | 7) => KeyCode::Home,
            Some(4 | 8) => KeyCode::End,
            Some(3) => KeyCode::Delete,
            Some(5) => KeyCode::PageUp,
            Some(6) => KeyCode::PageDown,
            _ => return Step::Skip(consumed),
        },
        _ => return Step::Skip(consumed),
    };
    let event = KeyEvent::new(code).with_modifiers(modifier_param(params));
    Step::Emit(InputEvent::Key(event), consumed)
}

/// Decodes `ESC [ < button ; column ; row (M|m)`.
fn decode_sgr_mouse(bytes: &[u8]) -> Step {
    let mut end = 3;
    while let Some(&b) = bytes.get(end) {
        if b.is_ascii_digit() || b == b';' {
            end += 1;
        } else {
            break;
        }
    }
    if end >= bytes.len() {
        return Step::Incomplete;
    }

    let phase = match bytes[end] {
        b'M' => MousePhase::DownOrMove,
        b'm' => MousePhase::Up,
        0x40..=0x7e => return Step::Skip(end + 1),
        _ => return Step::Skip(end),
    };
    let consumed = end + 1;

    let Some((code, x, y)) = sgr_params(&bytes[3..end]) else {
        return Step::Skip(consumed);
    };
    if x == 0 || y == 0 {
        return Step::Skip(consumed);
    }

    let button = if code & WHEEL_BIT == 0 && code & 0b11 == 0 {
        MouseButton::Left
    } else {
        MouseButton::Other
    };
    Step::Emit(
        InputEvent::Mouse(MouseEvent {
            button,
            x,
            y,
            phase,
        }),
        consumed,
    )
}

fn sgr_params(params: &[u8]) -> Option<(u16, u16, u16)> {
    let text = std::str::from_utf8(params).ok()?;
    let mut parts = text.split(';');
    let code = parts.next()?.parse().ok()?;
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((code, x, y))
}

fn param(params: &[u8], index: usize) -> Option<u16> {
    let text = std::str::from_utf8(params).ok()?;
    text.split(';').nth(index)?.parse().ok()
}

/// xterm encodes modifiers as `1 + bits` in the second parameter.
fn modifier_param(params: &[u8]) -> Modifiers {
    let Some(value) = param(params, 1) else {
        return Modifiers::empty();
    };
    let bits = value.saturating_sub(1);
    let mut modifiers = Modifiers::empty();
    if bits & 1 != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if bits & 2 != 0 {
        modifiers |= Modifiers::ALT;
    }
    if bits & 4 != 0 {
        modifiers |= Modifiers::CTRL;
    }
    modifiers
}

fn decode_utf8(bytes: &[u8]) -> Step {
    let width = match bytes[0] {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return Step::Skip(1),
    };
    if bytes.len() < width {
        return Step::Incomplete;
    }
    match std::str::from_utf8(&bytes[..width])
        .ok()
        .and_then(|s| s.chars().next())
    {
        Some(c) => key(KeyCode::Char(c), width),
        None => Step::Skip(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(button: MouseButton, x: u16, y: u16, phase: MousePhase) -> InputEvent {
        InputEvent::Mouse(MouseEvent {
            button,
            x,
            y,
            phase,
        })
    }

    fn plain(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code))
    }

    #[test]
    fn left_press_decodes_to_down_or_move() {
        let mut decoder = InputDecoder::new();
        let events = decoder.decode(b"\x1b[<0;12;5M");
        assert_eq!(
            events,
            vec![mouse(MouseButton::Left, 12, 5, MousePhase::DownOrMove)]
        );
    }

    #[test]
    fn left_release_decodes_to_up_at_same_cell() {
        let mut decoder = InputDecoder::new();
        let events = decoder.decode(b"\x1b[<0;12;5m");
        assert_eq!(events, vec![mouse(MouseButton::Left, 12, 5, MousePhase::Up)]);
    }

    #[test]
    fn drag_motion_keeps_left_button() {
        let mut decoder = InputDecoder::new();
        let events = decoder.decode(b"\x1b[<32;40;17M");
        assert_eq!(
            events,
            vec![mouse(MouseButton::Left, 40, 17, MousePhase::DownOrMove)]
        );
    }

    #[test]
    fn hover_and_wheel_are_other_button() {
        let mut decoder = InputDecoder::new();
        let events = decoder.decode(b"\x1b[<35;3;4M\x1b[<64;3;4M\x1b[<2;3;4M");
        assert_eq!(
            events,
            vec![
                mouse(MouseButton::Other, 3, 4, MousePhase::DownOrMove),
                mouse(MouseButton::Other, 3, 4, MousePhase::DownOrMove),
                mouse(MouseButton::Other, 3, 4, MousePhase::DownOrMove),
            ]
        );
    }

    #[test]
    fn several_reports_in_one_chunk_keep_order() {
        let mut decoder = InputDecoder::new();
        let events = decoder.decode(b"\x1b[<0;1;1M\x1b[<32;2;1M\x1b[<0;2;1m");
        assert_eq!(
            events,
            vec![
                mouse(MouseButton::Left, 1, 1, MousePhase::DownOrMove),
                mouse(MouseButton::Left, 2, 1, MousePhase::DownOrMove),
                mouse(MouseButton::Left, 2, 1, MousePhase::Up),
            ]
        );
    }

    #[test]
    fn report_split_across_chunks_is_reassembled() {
        let mut decoder = InputDecoder::new();
        assert!(decoder.decode(b"\x1b[<0;1").is_empty());
        assert!(decoder.has_pending());
        let events = decoder.decode(b"2;5M");
        assert_eq!(
            events,
            vec![mouse(MouseButton::Left, 12, 5, MousePhase::DownOrMove)]
        );
        assert!(!decoder.has_pending());
    }

    #[test]
    fn malformed_reports_are_dropped() {
        let mut decoder = InputDecoder::new();
        assert!(decoder.decode(b"\x1b[<0;12M").is_empty());
        assert!(decoder.decode(b"\x1b[<0;0;5M").is_empty());
        assert!(decoder.decode(b"\x1b[<0;1;2;3M").is_empty());
        assert!(decoder.decode(b"\x1b[<0;99999;5M").is_empty());
        assert!(!decoder.has_pending());
    }

    #[test]
    fn bad_report_terminator_is_swallowed_with_the_report() {
        let mut decoder = InputDecoder::new();
        assert!(decoder.decode(b"\x1b[<0;12;5X").is_empty());
        assert!(decoder.decode(b"\x1b[<0;12;5r").is_empty());
        assert_eq!(decoder.decode(b"\x1b[<0;12;5rq"), vec![plain(KeyCode::Char('q'))]);
        assert!(!decoder.has_pending());
    }

    #[test]
    fn text_around_a_report_is_still_decoded() {
        let mut decoder = InputDecoder::new();
        let events = decoder.decode(b"a\x1b[<0;2;3Mb");
        assert_eq!(
            events,
            vec![
                plain(KeyCode::Char('a')),
                mouse(MouseButton::Left, 2, 3, MousePhase::DownOrMove),
                plain(KeyCode::Char('b')),
            ]
        );
    }

    #[test]
    fn arrow_keys_in_csi_and_ss3_form() {
        let mut decoder = InputDecoder::new();
        let events = decoder.decode(b"\x1b[A\x1b[B\x1bOA\x1bOB");
        assert_eq!(
            events,
            vec![
                plain(KeyCode::Up),
                plain(KeyCode::Down),
                plain(KeyCode::Up),
                plain(KeyCode::Down),
            ]
        );
    }

    #[test]
    fn modified_arrow_carries_modifiers() {
        let mut decoder = InputDecoder::new();
        let events = decoder.decode(b"\x1b[1;5A");
        assert_eq!(
            events,
            vec![InputEvent::Key(
                KeyEvent::new(KeyCode::Up).with_modifiers(Modifiers::CTRL)
            )]
        );
    }

    #[test]
    fn tilde_keys() {
        let mut decoder = InputDecoder::new();
        let events = decoder.decode(b"\x1b[3~\x1b[5~\x1b[6~\x1b[99~");
        assert_eq!(
            events,
            vec![
                plain(KeyCode::Delete),
                plain(KeyCode::PageUp),
                plain(KeyCode::PageDown),
            ]
        );
    }

    #[test]
    fn control_characters() {
        let mut decoder = InputDecoder::new();
        let events = decoder.decode(b"\r\n\t \x7f\x03");
        assert_eq!(
            events,
            vec![
                plain(KeyCode::Enter),
                plain(KeyCode::Char('\n')),
                plain(KeyCode::Tab),
                plain(KeyCode::Char(' ')),
                plain(KeyCode::Backspace),
                InputEvent::Key(KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL)),
            ]
        );
    }

    #[test]
    fn alt_prefixed_character() {
        let mut decoder = InputDecoder::new();
        let events = decoder.decode(b"\x1bx");
        assert_eq!(
            events,
            vec![InputEvent::Key(
                KeyEvent::new(KeyCode::Char('x')).with_modifiers(Modifiers::ALT)
            )]
        );
    }

    #[test]
    fn lone_escape_waits_for_flush() {
        let mut decoder = InputDecoder::new();
        assert!(decoder.decode(b"\x1b").is_empty());
        assert!(decoder.has_pending());
        assert_eq!(decoder.flush(), Some(plain(KeyCode::Esc)));
        assert!(!decoder.has_pending());
    }

    #[test]
    fn double_escape_emits_one_key_and_holds_the_second() {
        let mut decoder = InputDecoder::new();
        assert_eq!(decoder.decode(b"\x1b\x1b"), vec![plain(KeyCode::Esc)]);
        assert_eq!(decoder.flush(), Some(plain(KeyCode::Esc)));
    }

    #[test]
    fn flush_drops_partial_sequences() {
        let mut decoder = InputDecoder::new();
        assert!(decoder.decode(b"\x1b[<0;3").is_empty());
        assert_eq!(decoder.flush(), None);
        assert!(decoder.decode(b";4M").iter().all(|e| matches!(e, InputEvent::Key(_))));
    }

    #[test]
    fn multibyte_text_split_across_chunks() {
        let mut decoder = InputDecoder::new();
        let bytes = "é".as_bytes();
        assert!(decoder.decode(&bytes[..1]).is_empty());
        assert_eq!(decoder.decode(&bytes[1..]), vec![plain(KeyCode::Char('é'))]);
    }

    #[test]
    fn oversized_partial_is_discarded() {
        let mut decoder = InputDecoder::new();
        let mut chunk = b"\x1b[<".to_vec();
        chunk.extend(std::iter::repeat_n(b'1', 64));
        assert!(decoder.decode(&chunk).is_empty());
        assert!(!decoder.has_pending());
    }
}
