// Frame encoding for both dialects:
//
// * `format_frame` / `write_frame`
// * `terminate`
// * the `key:value` vs `key: value` invariant, checked with proptest

#[cfg(test)]
mod tests {
    use eventpush_core::framing::{
        format_frame, terminate, write_frame, Dialect, KEY_DATA, KEY_ID, KEY_LEGACY_EVENT, KEY_RETRY,
        LEGACY_EVENT_NAME,
    };
    use proptest::prelude::*;

// # ✅ 1. Standard frames have no space after the colon

    #[test]
    fn standard_frame_layout() {
        assert_eq!(format_frame(Dialect::Standard, KEY_DATA, "hello"), "data:hello\n");
        assert_eq!(format_frame(Dialect::Standard, KEY_ID, 7), "id:7\n");
        assert_eq!(format_frame(Dialect::Standard, KEY_RETRY, 3000u64), "retry:3000\n");
    }

// # ✅ 2. Legacy frames carry exactly one space

    #[test]
    fn legacy_frame_layout() {
        assert_eq!(format_frame(Dialect::Legacy, KEY_DATA, "hello"), "data: hello\n");
        assert_eq!(
            format_frame(Dialect::Legacy, KEY_LEGACY_EVENT, LEGACY_EVENT_NAME),
            "Event: sse\n"
        );
    }

// # ✅ 3. Empty values still produce a frame

    #[test]
    fn empty_value_is_framed() {
        assert_eq!(format_frame(Dialect::Standard, KEY_DATA, ""), "data:\n");
        assert_eq!(format_frame(Dialect::Legacy, KEY_DATA, ""), "data: \n");
    }

// # ✅ 4. write_frame appends, terminate closes the group

    #[test]
    fn frames_accumulate_into_one_group() {
        let mut out = String::new();
        write_frame(&mut out, Dialect::Standard, KEY_ID, 0);
        write_frame(&mut out, Dialect::Standard, KEY_DATA, "a");
        write_frame(&mut out, Dialect::Standard, KEY_DATA, "b");
        terminate(&mut out);
        assert_eq!(out, "id:0\ndata:a\ndata:b\n\n");
    }

// # ✅ 5. Dialect metadata

    #[test]
    fn dialect_helpers() {
        assert!(Dialect::Legacy.is_legacy());
        assert!(!Dialect::Standard.is_legacy());
        assert_eq!(Dialect::default(), Dialect::Standard);
        assert_eq!(Dialect::Legacy.to_string(), "legacy");
        assert_eq!(serde_json::to_string(&Dialect::Standard).unwrap(), "\"standard\"");
    }

// # 🔁 6. Property: one trailing newline, space iff legacy

    proptest! {
        #[test]
        fn frame_shape_holds_for_any_line(
            key in "[a-zA-Z]{1,12}",
            value in "[^\r\n]{0,64}",
            legacy in any::<bool>(),
        ) {
            let dialect = if legacy { Dialect::Legacy } else { Dialect::Standard };
            let frame = format_frame(dialect, &key, &value);

            prop_assert!(frame.ends_with('\n'));
            prop_assert!(!frame.ends_with("\n\n"));
            prop_assert_eq!(frame.matches('\n').count(), 1);

            let prefix = format!("{}:", key);
            prop_assert!(frame.starts_with(&prefix));
            let rest = &frame[prefix.len()..frame.len() - 1];
            if legacy {
                prop_assert_eq!(rest, format!(" {}", value));
            } else {
                prop_assert_eq!(rest, value.as_str());
            }
        }
    }
}
