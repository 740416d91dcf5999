// Take in one block's bytes and return a hex view of it

// Implementations

/// Render a block as a hex dump, 16 bytes to a line, each line addressed
/// as `block.offset`.
///
/// Runs of identical lines collapse into a single `*`, so a mostly-zero
/// 4096-byte block comes out as a handful of lines instead of 256.
pub fn hex_view(block_number: usize, bytes: &[u8]) -> String {
    let mut screen_string = String::new();

    // push the header
    screen_string.push_str(" Block.Off   00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F\n");

    let mut previous: Option<&[u8]> = None;
    let mut collapsed = false;

    let mut offset = 0;
    while offset < bytes.len() {
        let row = &bytes[offset..bytes.len().min(offset + 16)];

        // A repeat of the line above gets folded into one `*`.
        if previous == Some(row) {
            if !collapsed {
                screen_string.push_str("     *\n");
                collapsed = true;
            }
            offset += 16;
            continue;
        }
        previous = Some(row);
        collapsed = false;

        // make the line
        let mut line = String::new();
        // first the address; offsets inside a block fit in three hex
        // digits, block numbers get padded to line up
        line.push_str(&format!("{block_number:>6}.{offset:03X}  "));

        // now for all the numbers
        for i in 0..16 {
            // pad if we are outside of range
            if i >= row.len() {
                line.push_str("   ");
            } else {
                line.push_str(&format!("{:02X} ", row[i]));
            }
        }

        // now for the text version
        line.push(' ');
        for byte in row {
            let mut character = char::from(*byte);
            if !character.is_ascii() || character.is_ascii_control() {
                character = '.';
            }
            line.push(character);
        }

        // line is done. Add it to the screen
        screen_string.push_str(&line);
        screen_string.push('\n');

        offset += 16;
    }

    // done!
    screen_string
}
