//! eDIP TFT display handle
//!
//! [`EdipTft`] owns the transport, so every operation takes `&mut self`
//! and writes its frame in one piece. To drive one display from several
//! tasks, put the handle behind the application's mutex; frames from two
//! callers can then never interleave on the line.
//!
//! Command methods are fire-and-forget: they return once the frame is
//! written. In small protocol mode the display still answers each packet
//! with ACK/NAK; those bytes stay in the receive buffer until the caller
//! drains them. [`EdipTft::execute_acked`] waits for the answers instead.
//! It and the buffer requests first discard whatever is still pending, so
//! only answers to their own packets are read. Touch events are not lost
//! by this: the display keeps them in its send buffer until asked.

use embedded_hal::delay::DelayNs;

use ediptft_hal::Uart;
use ediptft_protocol::frame::{BUFFER_INFO_REQUEST, SEND_BUFFER_REQUEST};
use ediptft_protocol::{
    BargraphDirection, BargraphStyle, BufferInfo, Color, Command, Events, Font, Frame,
    FrameError, Justification, MenuDirection, Packet, PortAction, Reply, ReplyError, ReplyParser,
    TextAngle, TouchMenuMode, Validation, DC1,
};

use crate::config::DisplayConfig;
use crate::error::Error;
use crate::transport::Transport;

/// One eDIP TFT display
pub struct EdipTft<U, D> {
    transport: Transport<U, D>,
    config: DisplayConfig,
}

impl<U: Uart, D: DelayNs> EdipTft<U, D> {
    /// Create a display handle
    ///
    /// The protocol mode and coordinate width in `config` stay fixed for
    /// the lifetime of the handle.
    pub fn new(uart: U, delay: D, config: DisplayConfig) -> Self {
        Self {
            transport: Transport::new(uart, delay),
            config,
        }
    }

    /// Open the serial line at the configured baud rate
    pub fn begin(&mut self) -> Result<(), Error<U::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "eDIP open at {} baud, {}",
            self.config.baud_rate,
            self.config.protocol
        );
        self.transport.open(self.config.baud_rate)
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Direct access to the transport
    pub fn transport_mut(&mut self) -> &mut Transport<U, D> {
        &mut self.transport
    }

    /// Give back the UART and delay
    pub fn release(self) -> (U, D) {
        self.transport.release()
    }

    /// Render a command into the frame that [`execute`](Self::execute) writes
    ///
    /// Runs the range checks first when validation is strict.
    pub fn encode(&self, command: &Command<'_>) -> Result<Frame, Error<U::Error>> {
        let width = self.config.coordinate_width;
        if self.config.validation == Validation::Strict {
            command.validate(width)?;
        }
        let payload = command.encode(width)?;
        Ok(self.config.protocol.encode(&payload)?)
    }

    /// Encode and write a command without waiting for the display
    pub fn execute(&mut self, command: &Command<'_>) -> Result<(), Error<U::Error>> {
        let frame = self.encode(command)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("eDIP -> {} ({} bytes)", command, frame.len());
        self.transport.write_bytes(&frame)
    }

    /// Write a command packet by packet, waiting for each ACK
    ///
    /// A NAK or a missing answer aborts with [`Error::Nak`] or
    /// [`Error::Timeout`]; nothing is retried. The display is deselected
    /// again even if the command packet failed. In direct mode the display
    /// sends no acknowledgements and this is the same as
    /// [`execute`](Self::execute).
    pub fn execute_acked(&mut self, command: &Command<'_>) -> Result<(), Error<U::Error>> {
        if !self.config.protocol.is_acknowledged() {
            return self.execute(command);
        }
        let width = self.config.coordinate_width;
        if self.config.validation == Validation::Strict {
            command.validate(width)?;
        }
        let packet = Frame::data_packet(&command.encode(width)?)?;

        self.discard_pending()?;
        self.select()?;
        let result = self.send_acked(&packet);
        let released = self.deselect();
        result.and(released)
    }

    /// Drop unread answers to earlier fire-and-forget commands
    fn discard_pending(&mut self) -> Result<(), Error<U::Error>> {
        while self.transport.byte_available()? {
            let _stale = self.transport.read_byte()?;
            #[cfg(feature = "defmt")]
            defmt::trace!("eDIP discarding {=u8:#x}", _stale);
        }
        Ok(())
    }

    fn select(&mut self) -> Result<(), Error<U::Error>> {
        match self.config.protocol.select_packet() {
            Some(packet) => self.send_acked(&packet),
            None => Ok(()),
        }
    }

    fn deselect(&mut self) -> Result<(), Error<U::Error>> {
        match self.config.protocol.deselect_packet() {
            Some(packet) => self.send_acked(&packet),
            None => Ok(()),
        }
    }

    fn send_acked(&mut self, packet: &[u8]) -> Result<(), Error<U::Error>> {
        self.transport.write_bytes(packet)?;
        match self.next_reply()? {
            Reply::Ack => Ok(()),
            Reply::Nak => {
                #[cfg(feature = "defmt")]
                defmt::warn!("eDIP NAK");
                Err(Error::Nak)
            }
            Reply::Packet(_) => Err(Error::Reply(ReplyError::Unexpected)),
        }
    }

    /// Read bytes until one complete reply has arrived
    fn next_reply(&mut self) -> Result<Reply, Error<U::Error>> {
        let mut parser = ReplyParser::new();
        loop {
            let byte = self.wait_and_read_byte()?;
            match parser.feed(byte) {
                Ok(Some(reply)) => return Ok(reply),
                Ok(None) => {}
                Err(e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("eDIP reply rejected: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    /// Send a link request and return the packet that answers it
    fn request(&mut self, request: &[u8]) -> Result<Packet, Error<U::Error>> {
        self.discard_pending()?;
        self.select()?;
        let result = self.send_acked(request).and_then(|()| match self.next_reply()? {
            Reply::Packet(packet) => Ok(packet),
            Reply::Nak => Err(Error::Nak),
            Reply::Ack => Err(Error::Reply(ReplyError::Unexpected)),
        });
        let released = self.deselect();
        let packet = result?;
        released?;
        Ok(packet)
    }

    /// Returns true if the display has sent a byte not read yet
    pub fn byte_available(&mut self) -> Result<bool, Error<U::Error>> {
        self.transport.byte_available()
    }

    /// Read one pending byte (blocks if none is pending)
    pub fn read_byte(&mut self) -> Result<u8, Error<U::Error>> {
        self.transport.read_byte()
    }

    /// Wait for one byte using the configured reply timeout
    pub fn wait_and_read_byte(&mut self) -> Result<u8, Error<U::Error>> {
        let result = self.transport.wait_and_read_byte(self.config.reply_timeout_ms);
        #[cfg(feature = "defmt")]
        if matches!(result, Err(Error::Timeout)) {
            defmt::warn!("eDIP reply timeout");
        }
        result
    }

    /// Drain every pending byte into `buf`
    pub fn read_buffer(&mut self, buf: &mut [u8]) -> Result<usize, Error<U::Error>> {
        self.transport.read_buffer(buf)
    }

    /// Ask how full the display's send and receive buffers are
    pub fn buffer_info(&mut self) -> Result<BufferInfo, Error<U::Error>> {
        let packet = self.request(&BUFFER_INFO_REQUEST)?;
        Ok(BufferInfo::from_packet(&packet)?)
    }

    /// Fetch the display's send buffer into `buf`
    ///
    /// Returns the number of bytes copied. The display hands over its
    /// buffer only once, so if the packet is longer than `buf` the call
    /// fails with [`FrameError::BufferTooSmall`] and the data is gone; a
    /// buffer of [`MAX_PAYLOAD_SIZE`](ediptft_protocol::MAX_PAYLOAD_SIZE) bytes always fits.
    pub fn read_send_buffer(&mut self, buf: &mut [u8]) -> Result<usize, Error<U::Error>> {
        let packet = self.request(&SEND_BUFFER_REQUEST)?;
        if packet.kind != DC1 {
            return Err(Error::Reply(ReplyError::InvalidPacket));
        }
        let len = packet.data.len();
        let dest = buf.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;
        dest.copy_from_slice(&packet.data);
        Ok(len)
    }

    /// Fetch the send buffer and iterate over the events in it
    pub fn read_events<'b>(&mut self, buf: &'b mut [u8]) -> Result<Events<'b>, Error<U::Error>> {
        let len = self.read_send_buffer(buf)?;
        Ok(Events::new(&buf[..len]))
    }

    /// Delete display contents (all pixels off)
    pub fn clear(&mut self) -> Result<(), Error<U::Error>> {
        self.execute(&Command::Clear)
    }

    /// Invert display contents
    pub fn invert(&mut self) -> Result<(), Error<U::Error>> {
        self.execute(&Command::Invert)
    }

    pub fn set_display_color(&mut self, fg: Color, bg: Color) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetDisplayColor { fg, bg })
    }

    pub fn fill_display_color(&mut self, bg: Color) -> Result<(), Error<U::Error>> {
        self.execute(&Command::FillDisplayColor { bg })
    }

    /// Backlight: `0` off, `1` on, `2..=255` on for `n1 / 10` seconds
    pub fn illumination(&mut self, n1: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::Illumination { n1 })
    }

    /// Backlight brightness in percent
    pub fn illumination_brightness(&mut self, percent: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::IlluminationBrightness { percent })
    }

    /// Buzzer: `0` off, `1` on, `2..=255` on for `n1 / 10` seconds
    pub fn buzzer(&mut self, n1: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::Buzzer { n1 })
    }

    /// Set, reset or toggle output port `port` (1-8)
    pub fn output_port(&mut self, port: u8, action: PortAction) -> Result<(), Error<U::Error>> {
        self.execute(&Command::OutputPort { port, action })
    }

    /// Write all output ports, bit 0 is port 1
    pub fn write_output_port(&mut self, mask: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::WriteOutputPort { mask })
    }

    /// Load internal image `nr` from EEPROM to `x1, y1`
    pub fn load_image(&mut self, x1: u16, y1: u16, nr: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::LoadImage { x1, y1, nr })
    }

    pub fn terminal_on(&mut self, on: bool) -> Result<(), Error<U::Error>> {
        self.execute(&Command::TerminalOn(on))
    }

    /// `false`: cursor invisible, `true`: cursor flashes
    pub fn cursor_on(&mut self, on: bool) -> Result<(), Error<U::Error>> {
        self.execute(&Command::CursorOn(on))
    }

    /// Position the cursor; origin is `(1, 1)` in the upper left corner
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetCursor { col, row })
    }

    pub fn set_line_color(&mut self, fg: Color, bg: Color) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetLineColor { fg, bg })
    }

    /// Point size for lines and rectangle outlines, 1-15 per axis
    pub fn set_line_thick(&mut self, x: u8, y: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetLineThick { x, y })
    }

    pub fn draw_line(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) -> Result<(), Error<U::Error>> {
        self.execute(&Command::DrawLine { x1, y1, x2, y2 })
    }

    pub fn draw_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) -> Result<(), Error<U::Error>> {
        self.execute(&Command::DrawRect { x1, y1, x2, y2 })
    }

    pub fn draw_rect_filled(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Color,
    ) -> Result<(), Error<U::Error>> {
        self.execute(&Command::DrawRectFilled {
            x1,
            y1,
            x2,
            y2,
            color,
        })
    }

    /// Switch all pixels in the area off
    pub fn clear_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) -> Result<(), Error<U::Error>> {
        self.execute(&Command::ClearRect { x1, y1, x2, y2 })
    }

    pub fn invert_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) -> Result<(), Error<U::Error>> {
        self.execute(&Command::InvertRect { x1, y1, x2, y2 })
    }

    pub fn set_text_color(&mut self, fg: Color, bg: Color) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetTextColor { fg, bg })
    }

    pub fn set_text_font(&mut self, font: Font) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetTextFont(font))
    }

    pub fn set_text_angle(&mut self, angle: TextAngle) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetTextAngle(angle))
    }

    /// Draw text anchored at `x1, y1`
    ///
    /// `|` starts a new line, text between `~` flashes and text between
    /// `@` flashes inverted. A `\` makes the next sentinel literal.
    /// Bytes are sent as given, in the display's character set; ASCII
    /// `&str` works as well.
    pub fn draw_text(
        &mut self,
        x1: u16,
        y1: u16,
        justification: Justification,
        text: impl AsRef<[u8]>,
    ) -> Result<(), Error<U::Error>> {
        self.execute(&Command::DrawText {
            x1,
            y1,
            justification,
            text: text.as_ref(),
        })
    }

    /// Define bargraph `no` (1-32) inside the rectangle `x1, y1, x2, y2`
    ///
    /// `sv` and `ev` are the values shown as 0% and 100%.
    #[allow(clippy::too_many_arguments)]
    pub fn define_bargraph(
        &mut self,
        dir: BargraphDirection,
        no: u8,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        sv: u8,
        ev: u8,
        style: BargraphStyle,
    ) -> Result<(), Error<U::Error>> {
        self.execute(&Command::DefineBargraph {
            dir,
            no,
            x1,
            y1,
            x2,
            y2,
            sv,
            ev,
            style,
        })
    }

    /// Set bargraph `no` to `value` and redraw it
    pub fn update_bargraph(&mut self, no: u8, value: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::UpdateBargraph { no, value })
    }

    pub fn set_bargraph_color(
        &mut self,
        no: u8,
        fg: Color,
        bg: Color,
        frame: Color,
    ) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetBargraphColor { no, fg, bg, frame })
    }

    /// Let the user set bargraph `no` by touch
    pub fn make_bargraph_touch(&mut self, no: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::MakeBargraphTouch { no })
    }

    /// Drive the backlight brightness from bargraph `no`
    pub fn link_bargraph_light(&mut self, no: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::LinkBargraphLight { no })
    }

    /// Invalidate bargraph `no`, and its touch field if it has one
    ///
    /// `n1 = 0` leaves it visible, `n1 = 1` erases it.
    pub fn delete_bargraph(&mut self, no: u8, n1: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::DeleteBargraph { no, n1 })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn define_instrument(
        &mut self,
        no: u8,
        x1: u16,
        y1: u16,
        image: u8,
        angle: u8,
        sv: u8,
        ev: u8,
    ) -> Result<(), Error<U::Error>> {
        self.execute(&Command::DefineInstrument {
            no,
            x1,
            y1,
            image,
            angle,
            sv,
            ev,
        })
    }

    pub fn update_instrument(&mut self, no: u8, value: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::UpdateInstrument { no, value })
    }

    pub fn redraw_instrument(&mut self, no: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::RedrawInstrument { no })
    }

    pub fn delete_instrument(&mut self, no: u8, n1: u8, n2: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::DeleteInstrument { no, n1, n2 })
    }

    /// Momentary touch key; `down`/`up` are sent on press and release
    ///
    /// The first character of `text` selects the label alignment
    /// (`C`, `L` or `R`).
    #[allow(clippy::too_many_arguments)]
    pub fn define_touch_key(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        down: u8,
        up: u8,
        text: impl AsRef<[u8]>,
    ) -> Result<(), Error<U::Error>> {
        self.execute(&Command::DefineTouchKey {
            x1,
            y1,
            x2,
            y2,
            down,
            up,
            text: text.as_ref(),
        })
    }

    /// Toggle switch with a text label
    #[allow(clippy::too_many_arguments)]
    pub fn define_touch_switch(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        down: u8,
        up: u8,
        text: impl AsRef<[u8]>,
    ) -> Result<(), Error<U::Error>> {
        self.execute(&Command::DefineTouchSwitch {
            x1,
            y1,
            x2,
            y2,
            down,
            up,
            text: text.as_ref(),
        })
    }

    /// Toggle switch drawn with an internal image
    pub fn define_touch_switch_image(
        &mut self,
        x1: u16,
        y1: u16,
        image: u8,
        down: u8,
        up: u8,
        text: impl AsRef<[u8]>,
    ) -> Result<(), Error<U::Error>> {
        self.execute(&Command::DefineTouchSwitchImage {
            x1,
            y1,
            image,
            down,
            up,
            text: text.as_ref(),
        })
    }

    pub fn set_touch_switch(&mut self, code: u8, value: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetTouchSwitch { code, value })
    }

    pub fn set_touchkey_colors(
        &mut self,
        n1: Color,
        n2: Color,
        n3: Color,
        s1: Color,
        s2: Color,
        s3: Color,
    ) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetTouchkeyColors {
            n1,
            n2,
            n3,
            s1,
            s2,
            s3,
        })
    }

    pub fn set_touchkey_font(&mut self, font: Font) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetTouchkeyFont(font))
    }

    pub fn set_touchkey_label_colors(&mut self, nf: Color, sf: Color) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetTouchkeyLabelColors { nf, sf })
    }

    /// Put the following touch switches in radio group `group`
    ///
    /// The display keeps at most one switch per group on.
    pub fn set_touch_group(&mut self, group: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetTouchGroup { group })
    }

    /// Touch menu opening towards `direction`; `items` separated by `|`
    #[allow(clippy::too_many_arguments)]
    pub fn define_touch_menu(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        down: u8,
        up: u8,
        direction: MenuDirection,
        items: impl AsRef<[u8]>,
    ) -> Result<(), Error<U::Error>> {
        self.execute(&Command::DefineTouchMenu {
            x1,
            y1,
            x2,
            y2,
            down,
            up,
            direction,
            items: items.as_ref(),
        })
    }

    pub fn set_touch_menu_mode(&mut self, mode: TouchMenuMode) -> Result<(), Error<U::Error>> {
        self.execute(&Command::SetTouchMenuMode(mode))
    }

    /// Open a touch menu after the display asked with `ESC T 0`
    pub fn open_touch_menu(&mut self) -> Result<(), Error<U::Error>> {
        self.set_touch_menu_mode(TouchMenuMode::OpenNow)
    }

    /// Remove the touch area with `code` (0 = all) from the touch query
    ///
    /// `n1 = 0` leaves it visible, `n1 = 1` erases it.
    pub fn remove_touch_area(&mut self, code: u8, n1: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::RemoveTouchArea { code, n1 })
    }

    /// Run macro `nr`; the display nests macros at most 7 deep
    pub fn call_macro(&mut self, nr: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::CallMacro(nr))
    }

    pub fn call_touch_macro(&mut self, nr: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::CallTouchMacro(nr))
    }

    pub fn call_menu_macro(&mut self, nr: u8) -> Result<(), Error<U::Error>> {
        self.execute(&Command::CallMenuMacro(nr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDelay, MockUart};
    use ediptft_protocol::frame::{deselect_packet, select_packet};
    use ediptft_protocol::{DeviceEvent, DeviceModel, ValidationError, ACK, DC2, ESC, NAK, NUL};

    fn direct() -> EdipTft<MockUart, MockDelay> {
        let config = DisplayConfig::for_model(DeviceModel::Edip240).direct();
        EdipTft::new(MockUart::new(), MockDelay::new(), config)
    }

    fn small(address: Option<u8>) -> EdipTft<MockUart, MockDelay> {
        let config = DisplayConfig::for_model(DeviceModel::Edip240).small(address);
        EdipTft::new(MockUart::new(), MockDelay::new(), config)
    }

    fn written(display: &EdipTft<MockUart, MockDelay>) -> &[u8] {
        display.transport.uart().written()
    }

    #[test]
    fn test_begin_opens_at_configured_baud() {
        let config = DisplayConfig::default().with_baud_rate(57_600);
        let mut display = EdipTft::new(MockUart::new(), MockDelay::new(), config);
        display.begin().unwrap();
        assert_eq!(display.transport.uart().config.unwrap().baudrate, 57_600);
    }

    #[test]
    fn test_set_cursor_direct() {
        let mut display = direct();
        display.set_cursor(5, 3).unwrap();
        assert_eq!(written(&display), &[ESC, b'T', b'P', 0x05, 0x03]);
    }

    #[test]
    fn test_draw_text_keeps_line_break() {
        let mut display = direct();
        display.draw_text(0, 0, Justification::Center, b"HI|BYE").unwrap();
        assert_eq!(
            written(&display),
            &[ESC, b'Z', b'C', 0, 0, b'H', b'I', b'|', b'B', b'Y', b'E', NUL]
        );
    }

    #[test]
    fn test_bargraph_define_then_delete() {
        let mut display = direct();
        display
            .define_bargraph(
                BargraphDirection::Left,
                1,
                0,
                0,
                10,
                5,
                0,
                100,
                BargraphStyle::PatternBar { pattern: 1 },
            )
            .unwrap();
        display.transport.uart_mut().clear_written();

        display.delete_bargraph(1, 1).unwrap();
        assert_eq!(written(&display), &[ESC, b'B', b'D', 1, 1]);
    }

    #[test]
    fn test_clear_is_stateless() {
        let mut display = small(Some(3));
        display.clear().unwrap();
        let first: heapless::Vec<u8, 64> = heapless::Vec::from_slice(written(&display)).unwrap();
        display.transport.uart_mut().clear_written();
        display.clear().unwrap();
        assert_eq!(written(&display), &first[..]);
    }

    #[test]
    fn test_one_write_per_command() {
        let mut display = small(Some(3));
        display.draw_line(0, 0, 10, 10).unwrap();
        assert_eq!(display.transport.uart().writes, 1);
    }

    #[test]
    fn test_terminal_on_small_protocol_addressed() {
        let mut display = small(Some(2));
        display.terminal_on(true).unwrap();

        let payload = [ESC, b'T', b'E', 0x01];
        let bcc = [DC1, 4]
            .iter()
            .chain(payload.iter())
            .fold(0u8, |a, &b| a.wrapping_add(b));

        let out = written(&display);
        assert_eq!(&out[..6], &select_packet(2));
        assert_eq!(&out[6..8], &[DC1, 4]);
        assert_eq!(&out[8..12], &payload);
        assert_eq!(out[12], bcc);
        assert_eq!(&out[13..], &deselect_packet(2));
    }

    #[test]
    fn test_small_protocol_without_address_has_no_bracket() {
        let mut display = small(None);
        display.invert().unwrap();
        let out = written(&display);
        assert_eq!(out[0], DC1);
        assert_eq!(out.len(), 2 + 3 + 1);
    }

    #[test]
    fn test_two_byte_coordinates() {
        let config = DisplayConfig::for_model(DeviceModel::Edip320).direct();
        let mut display = EdipTft::new(MockUart::new(), MockDelay::new(), config);
        display.load_image(300, 200, 4).unwrap();
        assert_eq!(
            written(&display),
            &[ESC, b'U', b'I', 0x2C, 0x01, 200, 0, 4]
        );
    }

    #[test]
    fn test_strict_rejects_before_writing() {
        let config = DisplayConfig::default().direct().strict();
        let mut display = EdipTft::new(MockUart::new(), MockDelay::new(), config);
        let result = display.update_bargraph(0, 10);
        assert_eq!(
            result,
            Err(Error::Validation(ValidationError::BargraphNumber(0)))
        );
        assert!(written(&display).is_empty());
    }

    #[test]
    fn test_trusting_passes_out_of_range_values() {
        let mut display = direct();
        display.update_bargraph(40, 10).unwrap();
        assert_eq!(written(&display), &[ESC, b'B', b'A', 40, 10]);
    }

    #[test]
    fn test_draw_text_passes_non_utf8_bytes() {
        let mut display = direct();
        // 0x84 is a glyph in the display's own character set
        display.draw_text(1, 1, Justification::Left, &[b'a', 0x84]).unwrap();
        assert_eq!(
            written(&display),
            &[ESC, b'Z', b'L', 1, 1, b'a', 0x84, NUL]
        );
    }

    #[test]
    fn test_touch_key_label_from_str() {
        let mut display = direct();
        display.define_touch_key(0, 0, 20, 10, 1, 0, "COK").unwrap();
        assert_eq!(
            written(&display),
            &[ESC, b'A', b'T', 0, 0, 20, 10, 1, 0, b'C', b'O', b'K', NUL]
        );
    }

    #[test]
    fn test_oversized_text_is_frame_error() {
        let mut display = direct();
        let result = display.draw_text(0, 0, Justification::Left, &[b'x'; 300]);
        assert_eq!(result, Err(Error::Frame(FrameError::PayloadTooLarge)));
    }

    #[test]
    fn test_wait_and_read_byte_times_out() {
        let mut display = direct();
        assert_eq!(display.wait_and_read_byte(), Err(Error::Timeout));
    }

    #[test]
    fn test_execute_acked_waits_for_each_ack() {
        let mut display = small(Some(1));
        let uart = display.transport.uart_mut();
        uart.reply_to_next_write(&[ACK]);
        uart.reply_to_next_write(&[ACK]);
        uart.reply_to_next_write(&[ACK]);
        display.execute_acked(&Command::Clear).unwrap();
        assert_eq!(display.transport.uart().writes, 3);
        assert!(!display.byte_available().unwrap());
    }

    #[test]
    fn test_execute_acked_nak_still_deselects() {
        let mut display = small(Some(1));
        let uart = display.transport.uart_mut();
        uart.reply_to_next_write(&[ACK]);
        uart.reply_to_next_write(&[NAK]);
        uart.reply_to_next_write(&[ACK]);
        let result = display.execute_acked(&Command::Clear);
        assert_eq!(result, Err(Error::Nak));
        assert_eq!(display.transport.uart().writes, 3);
        assert!(written(&display).ends_with(&deselect_packet(1)));
    }

    #[test]
    fn test_execute_acked_ignores_stale_nak() {
        let mut display = small(None);
        display.clear().unwrap();
        // The display rejected the clear; nobody read that NAK
        display.transport.uart_mut().queue_rx(&[NAK]);
        display.transport.uart_mut().reply_to_next_write(&[ACK]);

        assert_eq!(display.execute_acked(&Command::Invert), Ok(()));
        assert!(!display.byte_available().unwrap());
    }

    #[test]
    fn test_execute_acked_ignores_stale_ack() {
        let mut display = small(None);
        display.clear().unwrap();
        display.transport.uart_mut().queue_rx(&[ACK]);
        display.transport.uart_mut().reply_to_next_write(&[NAK]);

        assert_eq!(display.execute_acked(&Command::Invert), Err(Error::Nak));
    }

    #[test]
    fn test_execute_acked_without_answer_times_out() {
        let mut display = small(None);
        assert_eq!(display.execute_acked(&Command::Clear), Err(Error::Timeout));
    }

    #[test]
    fn test_execute_acked_direct_does_not_wait() {
        let mut display = direct();
        display.execute_acked(&Command::Clear).unwrap();
        assert_eq!(written(&display), &[ESC, b'D', b'L']);
    }

    fn buffer_info_reply(ready: u8, free: u8) -> [u8; 6] {
        let bcc = DC2.wrapping_add(2).wrapping_add(ready).wrapping_add(free);
        [ACK, DC2, 2, ready, free, bcc]
    }

    #[test]
    fn test_buffer_info() {
        let mut display = small(None);
        display
            .transport
            .uart_mut()
            .reply_to_next_write(&buffer_info_reply(4, 200));

        let info = display.buffer_info().unwrap();
        assert_eq!(info, BufferInfo { ready: 4, free: 200 });
        assert_eq!(written(&display), &BUFFER_INFO_REQUEST);
    }

    #[test]
    fn test_buffer_info_after_plain_command() {
        let mut display = small(None);
        display.clear().unwrap();
        // ACK for the clear is still unread
        display.transport.uart_mut().queue_rx(&[ACK]);
        display
            .transport
            .uart_mut()
            .reply_to_next_write(&buffer_info_reply(4, 200));

        let info = display.buffer_info().unwrap();
        assert_eq!(info, BufferInfo { ready: 4, free: 200 });
    }

    fn send_buffer_reply(data: &[u8]) -> heapless::Vec<u8, 64> {
        let len = data.len() as u8;
        let bcc = data
            .iter()
            .fold(DC1.wrapping_add(len), |a, &b| a.wrapping_add(b));
        let mut reply = heapless::Vec::new();
        reply.extend_from_slice(&[ACK, DC1, len]).unwrap();
        reply.extend_from_slice(data).unwrap();
        reply.push(bcc).unwrap();
        reply
    }

    #[test]
    fn test_read_events() {
        let mut display = small(None);
        let data = [ESC, b'A', 1, 7, ESC, b'B', 2, 3, 50];
        display
            .transport
            .uart_mut()
            .reply_to_next_write(&send_buffer_reply(&data));

        let mut buf = [0u8; 64];
        let mut events = display.read_events(&mut buf).unwrap();
        assert_eq!(events.next(), Some(Ok(DeviceEvent::TouchCode(7))));
        assert_eq!(
            events.next(),
            Some(Ok(DeviceEvent::Bargraph {
                number: 3,
                value: 50
            }))
        );
        assert_eq!(events.next(), None);
    }

    #[test]
    fn test_read_send_buffer_too_small() {
        let mut display = small(None);
        let data = [ESC, b'B', 2, 3, 50];
        display
            .transport
            .uart_mut()
            .reply_to_next_write(&send_buffer_reply(&data));

        let mut buf = [0u8; 4];
        assert_eq!(
            display.read_send_buffer(&mut buf),
            Err(Error::Frame(FrameError::BufferTooSmall))
        );
    }

    #[test]
    fn test_read_send_buffer_exact_fit() {
        let mut display = small(None);
        let data = [ESC, b'A', 1, 9];
        display
            .transport
            .uart_mut()
            .reply_to_next_write(&send_buffer_reply(&data));

        let mut buf = [0u8; 4];
        assert_eq!(display.read_send_buffer(&mut buf), Ok(4));
        assert_eq!(buf, data);
    }

    #[test]
    fn test_read_send_buffer_bad_checksum() {
        let mut display = small(None);
        display
            .transport
            .uart_mut()
            .reply_to_next_write(&[ACK, DC1, 1, 0x42, 0x00]);
        let mut buf = [0u8; 8];
        assert_eq!(
            display.read_send_buffer(&mut buf),
            Err(Error::Reply(ReplyError::InvalidChecksum))
        );
    }

    #[test]
    fn test_addressed_request_is_bracketed() {
        let mut display = small(Some(5));
        let uart = display.transport.uart_mut();
        uart.reply_to_next_write(&[ACK]);
        uart.reply_to_next_write(&buffer_info_reply(1, 2));
        uart.reply_to_next_write(&[ACK]);

        let info = display.buffer_info().unwrap();
        assert_eq!(info, BufferInfo { ready: 1, free: 2 });
        let out = written(&display);
        assert_eq!(&out[..6], &select_packet(5));
        assert_eq!(&out[6..10], &BUFFER_INFO_REQUEST);
        assert_eq!(&out[10..], &deselect_packet(5));
    }

    #[test]
    fn test_read_buffer_drains_pending_acks() {
        let mut display = small(None);
        display.clear().unwrap();
        display.transport.uart_mut().queue_rx(&[ACK]);
        let mut buf = [0u8; 4];
        assert_eq!(display.read_buffer(&mut buf), Ok(1));
        assert_eq!(buf[0], ACK);
    }
}
