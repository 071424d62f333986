//! Command catalog for eDIP TFT displays
//!
//! Each [`Command`] variant is one vendor command. [`Command::encode`]
//! renders it as `ESC`, a two letter opcode and the parameters in the
//! order the display expects. Identifiers (bargraph numbers, touch codes,
//! macro numbers) are plain bytes and go out unchecked unless
//! [`Command::validate`] is called first.

use crate::coord::CoordinateWidth;
use crate::frame::{FrameError, Payload};
use crate::types::{
    BargraphDirection, BargraphStyle, Color, Font, Justification, MenuDirection, PortAction,
    TextAngle, TouchMenuMode,
};
use crate::validate::{self, ValidationError};

/// Device commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    // Display control
    /// Delete display contents (all pixels off)
    Clear,
    /// Invert display contents
    Invert,
    /// Set display foreground and background color
    SetDisplayColor { fg: Color, bg: Color },
    /// Fill the display with a color
    FillDisplayColor { bg: Color },
    /// Backlight: 0 off, 1 on, 2-255 on for n/10 s
    Illumination { n1: u8 },
    /// Backlight brightness in percent (0-100)
    IlluminationBrightness { percent: u8 },
    /// Buzzer: 0 off, 1 on, 2-255 on for n/10 s
    Buzzer { n1: u8 },
    /// Set, reset or toggle one output port (1-8)
    OutputPort { port: u8, action: PortAction },
    /// Write all eight output ports at once
    WriteOutputPort { mask: u8 },
    /// Load image `nr` from EEPROM to `x1, y1`
    LoadImage { x1: u16, y1: u16, nr: u8 },

    // Cursor / terminal
    /// Show or hide the terminal
    TerminalOn(bool),
    /// Cursor flashing or invisible
    CursorOn(bool),
    /// Position the cursor, origin `(1, 1)` upper left
    SetCursor { col: u8, row: u8 },

    // Rectangle and line
    SetLineColor { fg: Color, bg: Color },
    /// Point size for lines and rectangles (1-15 per axis)
    SetLineThick { x: u8, y: u8 },
    DrawLine { x1: u16, y1: u16, x2: u16, y2: u16 },
    DrawRect { x1: u16, y1: u16, x2: u16, y2: u16 },
    DrawRectFilled { x1: u16, y1: u16, x2: u16, y2: u16, color: Color },
    /// Delete an area (pixels off)
    ClearRect { x1: u16, y1: u16, x2: u16, y2: u16 },
    InvertRect { x1: u16, y1: u16, x2: u16, y2: u16 },

    // Text
    SetTextColor { fg: Color, bg: Color },
    SetTextFont(Font),
    SetTextAngle(TextAngle),
    /// Draw text; `|` breaks lines, `~…~` flashes, `@…@` flashes inverted
    DrawText {
        x1: u16,
        y1: u16,
        justification: Justification,
        text: &'a [u8],
    },

    // Bargraph
    /// Define bargraph `no` (1-32) in the given rectangle, `sv`/`ev` map to 0%/100%
    DefineBargraph {
        dir: BargraphDirection,
        no: u8,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        sv: u8,
        ev: u8,
        style: BargraphStyle,
    },
    UpdateBargraph { no: u8, value: u8 },
    SetBargraphColor { no: u8, fg: Color, bg: Color, frame: Color },
    /// Make a bargraph adjustable by touch
    MakeBargraphTouch { no: u8 },
    /// Link a bargraph to the backlight brightness
    LinkBargraphLight { no: u8 },
    /// Invalidate bargraph; `n1 = 0` stays visible, `n1 = 1` removed
    DeleteBargraph { no: u8, n1: u8 },

    // Instrument
    DefineInstrument {
        no: u8,
        x1: u16,
        y1: u16,
        image: u8,
        angle: u8,
        sv: u8,
        ev: u8,
    },
    UpdateInstrument { no: u8, value: u8 },
    RedrawInstrument { no: u8 },
    DeleteInstrument { no: u8, n1: u8, n2: u8 },

    // Touch
    /// Momentary key: `down`/`up` codes are sent on press/release
    DefineTouchKey {
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        down: u8,
        up: u8,
        text: &'a [u8],
    },
    /// Toggle switch with a text label
    DefineTouchSwitch {
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        down: u8,
        up: u8,
        text: &'a [u8],
    },
    /// Toggle switch drawn with image `image`
    DefineTouchSwitchImage {
        x1: u16,
        y1: u16,
        image: u8,
        down: u8,
        up: u8,
        text: &'a [u8],
    },
    SetTouchSwitch { code: u8, value: u8 },
    /// Frame, fill and label colors for normal (`n*`) and selected (`s*`) keys
    SetTouchkeyColors {
        n1: Color,
        n2: Color,
        n3: Color,
        s1: Color,
        s2: Color,
        s3: Color,
    },
    SetTouchkeyFont(Font),
    SetTouchkeyLabelColors { nf: Color, sf: Color },
    /// Radio group for following switches, only one per group is on
    SetTouchGroup { group: u8 },
    /// Touch menu; `items` are separated by `|`
    DefineTouchMenu {
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        down: u8,
        up: u8,
        direction: MenuDirection,
        items: &'a [u8],
    },
    SetTouchMenuMode(TouchMenuMode),
    /// Remove a touch area by code (0 = all); `n1 = 1` also erases it
    RemoveTouchArea { code: u8, n1: u8 },

    // Macros
    CallMacro(u8),
    CallTouchMacro(u8),
    CallMenuMacro(u8),
}

impl<'a> Command<'a> {
    /// The two opcode letters following `ESC`
    pub fn opcode(&self) -> [u8; 2] {
        match *self {
            Command::Clear => *b"DL",
            Command::Invert => *b"DI",
            Command::SetDisplayColor { .. } => *b"FD",
            Command::FillDisplayColor { .. } => *b"DF",
            Command::Illumination { .. } => *b"YL",
            Command::IlluminationBrightness { .. } => *b"YH",
            Command::Buzzer { .. } => *b"YS",
            Command::OutputPort { .. } | Command::WriteOutputPort { .. } => *b"YW",
            Command::LoadImage { .. } => *b"UI",
            Command::TerminalOn(_) => *b"TE",
            Command::CursorOn(_) => *b"TC",
            Command::SetCursor { .. } => *b"TP",
            Command::SetLineColor { .. } => *b"FG",
            Command::SetLineThick { .. } => *b"GZ",
            Command::DrawLine { .. } => *b"GD",
            Command::DrawRect { .. } => *b"GR",
            Command::DrawRectFilled { .. } => *b"RF",
            Command::ClearRect { .. } => *b"RL",
            Command::InvertRect { .. } => *b"RI",
            Command::SetTextColor { .. } => *b"FZ",
            Command::SetTextFont(_) => *b"ZF",
            Command::SetTextAngle(_) => *b"ZW",
            Command::DrawText { justification, .. } => [b'Z', justification.to_byte()],
            Command::DefineBargraph { dir, .. } => [b'B', dir.to_byte()],
            Command::UpdateBargraph { .. } => *b"BA",
            Command::SetBargraphColor { .. } => *b"FB",
            Command::MakeBargraphTouch { .. } => *b"AB",
            Command::LinkBargraphLight { .. } => *b"YB",
            Command::DeleteBargraph { .. } => *b"BD",
            Command::DefineInstrument { .. } => *b"IP",
            Command::UpdateInstrument { .. } => *b"IA",
            Command::RedrawInstrument { .. } => *b"IN",
            Command::DeleteInstrument { .. } => *b"ID",
            Command::DefineTouchKey { .. } => *b"AT",
            Command::DefineTouchSwitch { .. } => *b"AK",
            Command::DefineTouchSwitchImage { .. } => *b"AJ",
            Command::SetTouchSwitch { .. } => *b"AP",
            Command::SetTouchkeyColors { .. } => *b"FE",
            Command::SetTouchkeyFont(_) => *b"AF",
            Command::SetTouchkeyLabelColors { .. } => *b"FA",
            Command::SetTouchGroup { .. } => *b"AR",
            Command::DefineTouchMenu { .. } => *b"AM",
            Command::SetTouchMenuMode(_) => *b"NT",
            Command::RemoveTouchArea { .. } => *b"AL",
            Command::CallMacro(_) => *b"MN",
            Command::CallTouchMacro(_) => *b"MT",
            Command::CallMenuMacro(_) => *b"MM",
        }
    }

    /// Render the command bytes
    ///
    /// Never fails for fixed-size commands; text commands fail with
    /// [`FrameError::PayloadTooLarge`] when the text does not fit one packet.
    pub fn encode(&self, width: CoordinateWidth) -> Result<Payload, FrameError> {
        let mut p = Payload::command(&self.opcode())?;
        let w = width;

        match *self {
            Command::Clear | Command::Invert => {}
            Command::SetDisplayColor { fg, bg }
            | Command::SetLineColor { fg, bg }
            | Command::SetTextColor { fg, bg } => {
                p.byte(fg.0)?.byte(bg.0)?;
            }
            Command::FillDisplayColor { bg } => {
                p.byte(bg.0)?;
            }
            Command::Illumination { n1 } | Command::Buzzer { n1 } => {
                p.byte(n1)?;
            }
            Command::IlluminationBrightness { percent } => {
                p.byte(percent)?;
            }
            Command::OutputPort { port, action } => {
                p.byte(port)?.byte(action.to_byte())?;
            }
            Command::WriteOutputPort { mask } => {
                p.byte(0)?.byte(mask)?;
            }
            Command::LoadImage { x1, y1, nr } => {
                p.point(x1, y1, w)?.byte(nr)?;
            }
            Command::TerminalOn(on) | Command::CursorOn(on) => {
                p.byte(u8::from(on))?;
            }
            Command::SetCursor { col, row } => {
                p.byte(col)?.byte(row)?;
            }
            Command::SetLineThick { x, y } => {
                p.byte(x)?.byte(y)?;
            }
            Command::DrawLine { x1, y1, x2, y2 }
            | Command::DrawRect { x1, y1, x2, y2 }
            | Command::ClearRect { x1, y1, x2, y2 }
            | Command::InvertRect { x1, y1, x2, y2 } => {
                p.point(x1, y1, w)?.point(x2, y2, w)?;
            }
            Command::DrawRectFilled {
                x1,
                y1,
                x2,
                y2,
                color,
            } => {
                p.point(x1, y1, w)?.point(x2, y2, w)?.byte(color.0)?;
            }
            Command::SetTextFont(font) | Command::SetTouchkeyFont(font) => {
                p.byte(font.0)?;
            }
            Command::SetTextAngle(angle) => {
                p.byte(angle.to_byte())?;
            }
            Command::DrawText { x1, y1, text, .. } => {
                p.point(x1, y1, w)?.text(text)?;
            }
            Command::DefineBargraph {
                no,
                x1,
                y1,
                x2,
                y2,
                sv,
                ev,
                style,
                ..
            } => {
                let (kind, mst) = style.to_params();
                p.byte(no)?
                    .point(x1, y1, w)?
                    .point(x2, y2, w)?
                    .bytes(&[sv, ev, kind, mst])?;
            }
            Command::UpdateBargraph { no, value } | Command::UpdateInstrument { no, value } => {
                p.byte(no)?.byte(value)?;
            }
            Command::SetBargraphColor { no, fg, bg, frame } => {
                p.bytes(&[no, fg.0, bg.0, frame.0])?;
            }
            Command::MakeBargraphTouch { no }
            | Command::LinkBargraphLight { no }
            | Command::RedrawInstrument { no } => {
                p.byte(no)?;
            }
            Command::DeleteBargraph { no, n1 } => {
                p.byte(no)?.byte(n1)?;
            }
            Command::DefineInstrument {
                no,
                x1,
                y1,
                image,
                angle,
                sv,
                ev,
            } => {
                p.byte(no)?
                    .point(x1, y1, w)?
                    .bytes(&[image, angle, sv, ev])?;
            }
            Command::DeleteInstrument { no, n1, n2 } => {
                p.bytes(&[no, n1, n2])?;
            }
            Command::DefineTouchKey {
                x1,
                y1,
                x2,
                y2,
                down,
                up,
                text,
            }
            | Command::DefineTouchSwitch {
                x1,
                y1,
                x2,
                y2,
                down,
                up,
                text,
            } => {
                p.point(x1, y1, w)?
                    .point(x2, y2, w)?
                    .byte(down)?
                    .byte(up)?
                    .text(text)?;
            }
            Command::DefineTouchSwitchImage {
                x1,
                y1,
                image,
                down,
                up,
                text,
            } => {
                p.point(x1, y1, w)?
                    .bytes(&[image, down, up])?
                    .text(text)?;
            }
            Command::SetTouchSwitch { code, value } => {
                p.byte(code)?.byte(value)?;
            }
            Command::SetTouchkeyColors {
                n1,
                n2,
                n3,
                s1,
                s2,
                s3,
            } => {
                p.bytes(&[n1.0, n2.0, n3.0, s1.0, s2.0, s3.0])?;
            }
            Command::SetTouchkeyLabelColors { nf, sf } => {
                p.byte(nf.0)?.byte(sf.0)?;
            }
            Command::SetTouchGroup { group } => {
                p.byte(group)?;
            }
            Command::DefineTouchMenu {
                x1,
                y1,
                x2,
                y2,
                down,
                up,
                direction,
                items,
            } => {
                p.point(x1, y1, w)?
                    .point(x2, y2, w)?
                    .bytes(&[down, up, direction.to_byte()])?
                    .text(items)?;
            }
            Command::SetTouchMenuMode(mode) => {
                p.byte(mode.to_byte())?;
            }
            Command::RemoveTouchArea { code, n1 } => {
                p.byte(code)?.byte(n1)?;
            }
            Command::CallMacro(nr) | Command::CallTouchMacro(nr) | Command::CallMenuMacro(nr) => {
                p.byte(nr)?;
            }
        }

        Ok(p)
    }

    /// Check documented parameter ranges
    ///
    /// Group exclusivity and the macro nesting limit of 7 are enforced by
    /// the display and are not checked here.
    pub fn validate(&self, width: CoordinateWidth) -> Result<(), ValidationError> {
        match *self {
            Command::LoadImage { x1, y1, .. } | Command::DefineInstrument { x1, y1, .. } => {
                validate::coords(&[x1, y1], width)
            }
            Command::SetCursor { col, row } => validate::cursor_position(col, row),
            Command::SetLineThick { x, y } => {
                validate::line_thickness(x)?;
                validate::line_thickness(y)
            }
            Command::DrawLine { x1, y1, x2, y2 }
            | Command::DrawRect { x1, y1, x2, y2 }
            | Command::DrawRectFilled { x1, y1, x2, y2, .. }
            | Command::ClearRect { x1, y1, x2, y2 }
            | Command::InvertRect { x1, y1, x2, y2 } => validate::coords(&[x1, y1, x2, y2], width),
            Command::DrawText { x1, y1, text, .. } => {
                validate::coords(&[x1, y1], width)?;
                validate::text(text)
            }
            Command::DefineBargraph {
                no, x1, y1, x2, y2, ..
            } => {
                validate::bargraph_number(no)?;
                validate::coords(&[x1, y1, x2, y2], width)
            }
            Command::UpdateBargraph { no, .. }
            | Command::SetBargraphColor { no, .. }
            | Command::MakeBargraphTouch { no }
            | Command::LinkBargraphLight { no }
            | Command::DeleteBargraph { no, .. } => validate::bargraph_number(no),
            Command::DefineTouchKey {
                x1,
                y1,
                x2,
                y2,
                down,
                up,
                text,
            }
            | Command::DefineTouchSwitch {
                x1,
                y1,
                x2,
                y2,
                down,
                up,
                text,
            }
            | Command::DefineTouchMenu {
                x1,
                y1,
                x2,
                y2,
                down,
                up,
                items: text,
                ..
            } => {
                validate::coords(&[x1, y1, x2, y2], width)?;
                validate::touch_codes(down, up)?;
                validate::text(text)
            }
            Command::DefineTouchSwitchImage {
                x1,
                y1,
                down,
                up,
                text,
                ..
            } => {
                validate::coords(&[x1, y1], width)?;
                validate::touch_codes(down, up)?;
                validate::text(text)
            }
            Command::SetTouchSwitch { code, .. } => validate::touch_code(code),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{ESC, NUL};

    const W1: CoordinateWidth = CoordinateWidth::One;
    const W2: CoordinateWidth = CoordinateWidth::Two;

    #[test]
    fn test_clear() {
        let p = Command::Clear.encode(W1).unwrap();
        assert_eq!(p.as_bytes(), &[ESC, b'D', b'L']);
    }

    #[test]
    fn test_set_cursor() {
        let p = Command::SetCursor { col: 5, row: 3 }.encode(W1).unwrap();
        assert_eq!(p.as_bytes(), &[ESC, b'T', b'P', 0x05, 0x03]);
    }

    #[test]
    fn test_terminal_on() {
        let on = Command::TerminalOn(true).encode(W1).unwrap();
        assert_eq!(on.as_bytes(), &[ESC, b'T', b'E', 0x01]);
        let off = Command::TerminalOn(false).encode(W1).unwrap();
        assert_eq!(off.as_bytes(), &[ESC, b'T', b'E', 0x00]);
    }

    #[test]
    fn test_draw_text_keeps_sentinels() {
        let cmd = Command::DrawText {
            x1: 0,
            y1: 0,
            justification: Justification::Center,
            text: b"HI|BYE",
        };
        let p = cmd.encode(W1).unwrap();
        assert_eq!(
            p.as_bytes(),
            &[ESC, b'Z', b'C', 0, 0, b'H', b'I', b'|', b'B', b'Y', b'E', NUL]
        );
    }

    #[test]
    fn test_draw_line_two_byte_coords() {
        let cmd = Command::DrawLine {
            x1: 0,
            y1: 10,
            x2: 319,
            y2: 239,
        };
        let p = cmd.encode(W2).unwrap();
        assert_eq!(
            p.as_bytes(),
            &[ESC, b'G', b'D', 0, 0, 10, 0, 0x3F, 0x01, 239, 0]
        );
    }

    #[test]
    fn test_define_bargraph() {
        let cmd = Command::DefineBargraph {
            dir: BargraphDirection::Left,
            no: 1,
            x1: 0,
            y1: 0,
            x2: 10,
            y2: 5,
            sv: 0,
            ev: 100,
            style: BargraphStyle::PatternBar { pattern: 1 },
        };
        let p = cmd.encode(W1).unwrap();
        assert_eq!(
            p.as_bytes(),
            &[ESC, b'B', b'L', 1, 0, 0, 10, 5, 0, 100, 0, 1]
        );
    }

    #[test]
    fn test_delete_bargraph() {
        let p = Command::DeleteBargraph { no: 1, n1: 1 }.encode(W1).unwrap();
        assert_eq!(p.as_bytes(), &[ESC, b'B', b'D', 1, 1]);
    }

    #[test]
    fn test_touch_key() {
        let cmd = Command::DefineTouchKey {
            x1: 1,
            y1: 2,
            x2: 30,
            y2: 40,
            down: b'A',
            up: 0,
            text: b"COK",
        };
        let p = cmd.encode(W1).unwrap();
        assert_eq!(
            p.as_bytes(),
            &[ESC, b'A', b'T', 1, 2, 30, 40, b'A', 0, b'C', b'O', b'K', NUL]
        );
    }

    #[test]
    fn test_touch_menu() {
        let cmd = Command::DefineTouchMenu {
            x1: 0,
            y1: 0,
            x2: 50,
            y2: 12,
            down: 0,
            up: 20,
            direction: MenuDirection::Down,
            items: b"File|Edit",
        };
        let p = cmd.encode(W1).unwrap();
        assert_eq!(&p[..11], &[ESC, b'A', b'M', 0, 0, 50, 12, 0, 20, b'U', b'F']);
        assert_eq!(p[p.len() - 1], NUL);
    }

    #[test]
    fn test_define_bargraph_two_byte_coords() {
        let cmd = Command::DefineBargraph {
            dir: BargraphDirection::Up,
            no: 2,
            x1: 300,
            y1: 10,
            x2: 310,
            y2: 200,
            sv: 0,
            ev: 100,
            style: BargraphStyle::LineInRect { width: 3 },
        };
        let p = cmd.encode(W2).unwrap();
        assert_eq!(
            p.as_bytes(),
            &[
                ESC, b'B', b'O', 2, 0x2C, 0x01, 10, 0, 0x36, 0x01, 200, 0, 0, 100, 3, 3
            ]
        );
    }

    #[test]
    fn test_define_instrument_two_byte_coords() {
        let cmd = Command::DefineInstrument {
            no: 1,
            x1: 260,
            y1: 5,
            image: 7,
            angle: 90,
            sv: 0,
            ev: 50,
        };
        let p = cmd.encode(W2).unwrap();
        assert_eq!(
            p.as_bytes(),
            &[ESC, b'I', b'P', 1, 0x04, 0x01, 5, 0, 7, 90, 0, 50]
        );
    }

    #[test]
    fn test_draw_rect_filled_two_byte_coords() {
        let cmd = Command::DrawRectFilled {
            x1: 1,
            y1: 2,
            x2: 319,
            y2: 239,
            color: Color(4),
        };
        let p = cmd.encode(W2).unwrap();
        assert_eq!(
            p.as_bytes(),
            &[ESC, b'R', b'F', 1, 0, 2, 0, 0x3F, 0x01, 239, 0, 4]
        );
    }

    #[test]
    fn test_touch_key_two_byte_coords() {
        let cmd = Command::DefineTouchKey {
            x1: 256,
            y1: 1,
            x2: 400,
            y2: 2,
            down: 5,
            up: 6,
            text: b"CA",
        };
        let p = cmd.encode(W2).unwrap();
        assert_eq!(
            p.as_bytes(),
            &[ESC, b'A', b'T', 0, 1, 1, 0, 0x90, 0x01, 2, 0, 5, 6, b'C', b'A', NUL]
        );
    }

    #[test]
    fn test_touch_switch_two_byte_coords() {
        let cmd = Command::DefineTouchSwitch {
            x1: 0,
            y1: 300,
            x2: 20,
            y2: 310,
            down: 1,
            up: 2,
            text: b"L",
        };
        let p = cmd.encode(W2).unwrap();
        assert_eq!(
            p.as_bytes(),
            &[ESC, b'A', b'K', 0, 0, 0x2C, 0x01, 20, 0, 0x36, 0x01, 1, 2, b'L', NUL]
        );
    }

    #[test]
    fn test_touch_switch_image_two_byte_coords() {
        let cmd = Command::DefineTouchSwitchImage {
            x1: 280,
            y1: 3,
            image: 9,
            down: 10,
            up: 11,
            text: b"",
        };
        let p = cmd.encode(W2).unwrap();
        assert_eq!(
            p.as_bytes(),
            &[ESC, b'A', b'J', 0x18, 0x01, 3, 0, 9, 10, 11, NUL]
        );
    }

    #[test]
    fn test_touch_menu_two_byte_coords() {
        let cmd = Command::DefineTouchMenu {
            x1: 300,
            y1: 0,
            x2: 319,
            y2: 12,
            down: 0,
            up: 20,
            direction: MenuDirection::Left,
            items: b"A|B",
        };
        let p = cmd.encode(W2).unwrap();
        assert_eq!(
            p.as_bytes(),
            &[
                ESC, b'A', b'M', 0x2C, 0x01, 0, 0, 0x3F, 0x01, 12, 0, 0, 20, b'L', b'A', b'|', b'B',
                NUL
            ]
        );
    }

    #[test]
    fn test_output_port() {
        let p = Command::OutputPort {
            port: 3,
            action: PortAction::Toggle,
        }
        .encode(W1)
        .unwrap();
        assert_eq!(p.as_bytes(), &[ESC, b'Y', b'W', 3, 2]);

        let p = Command::WriteOutputPort { mask: 0xA5 }.encode(W1).unwrap();
        assert_eq!(p.as_bytes(), &[ESC, b'Y', b'W', 0, 0xA5]);
    }

    #[test]
    fn test_open_touch_menu() {
        let p = Command::SetTouchMenuMode(TouchMenuMode::OpenNow)
            .encode(W1)
            .unwrap();
        assert_eq!(p.as_bytes(), &[ESC, b'N', b'T', 2]);
    }

    #[test]
    fn test_encoding_is_stateless() {
        let a = Command::Clear.encode(W1).unwrap();
        let b = Command::Clear.encode(W1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_payload_starts_with_opcode() {
        let cmd = Command::CallMacro(9);
        let p = cmd.encode(W1).unwrap();
        assert_eq!(p[0], ESC);
        assert_eq!(&p[1..3], &cmd.opcode());
    }

    #[test]
    fn test_validate_bargraph_number() {
        let cmd = Command::UpdateBargraph { no: 33, value: 1 };
        assert_eq!(cmd.validate(W1), Err(ValidationError::BargraphNumber(33)));
        // Encoding itself never checks
        assert!(cmd.encode(W1).is_ok());
    }

    #[test]
    fn test_validate_coordinates_follow_width() {
        let cmd = Command::DrawRect {
            x1: 0,
            y1: 0,
            x2: 300,
            y2: 10,
        };
        assert_eq!(
            cmd.validate(W1),
            Err(ValidationError::CoordinateOutOfRange(300))
        );
        assert!(cmd.validate(W2).is_ok());
    }

    #[test]
    fn test_validate_line_thick() {
        assert!(Command::SetLineThick { x: 2, y: 15 }.validate(W1).is_ok());
        assert_eq!(
            Command::SetLineThick { x: 2, y: 16 }.validate(W1),
            Err(ValidationError::LineThickness(16))
        );
    }

    #[test]
    fn test_validate_remove_all_touch_areas() {
        // code 0 removes every touch area and is valid
        assert!(Command::RemoveTouchArea { code: 0, n1: 1 }.validate(W1).is_ok());
    }
}
