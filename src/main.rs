fn main() {
    std::process::exit(tkx_lib::run());
}
