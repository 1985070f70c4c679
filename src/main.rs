// SPDX-License-Identifier: MPL-2.0
use dicom_lens::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        data_dir: args.opt_value_from_str("--data-dir").unwrap(),
        config_dir: args.opt_value_from_str("--config-dir").unwrap(),
        file_path: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };

    app::run(flags)
}
