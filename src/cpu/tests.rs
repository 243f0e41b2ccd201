use crate::{
    bus::{Bus, Memory},
    cpu::{
        cpu::{Cpu, Flow},
        registers::FLAG,
    },
    display::framebuffer::{PIXEL_OFF, PIXEL_ON},
    error::{Error, Result},
    font,
    keypad::Keypad,
};

/// Small bus that only implements the required methods, so the trait's default word
/// and block accessors get exercised too.
struct TestBus {
    mem: Vec<u8>,
}

impl TestBus {
    fn new(size: usize) -> Self {
        Self { mem: vec![0; size] }
    }
}

impl Bus for TestBus {
    fn capacity(&self) -> usize {
        self.mem.len()
    }

    fn get8(&self, addr: u16) -> Result<u8> {
        self.mem
            .get(addr as usize)
            .copied()
            .ok_or(Error::OutOfRange {
                addr: addr as usize,
            })
    }

    fn set8(&mut self, addr: u16, data: u8) -> Result<()> {
        match self.mem.get_mut(addr as usize) {
            Some(b) => {
                *b = data;
                Ok(())
            }
            None => Err(Error::OutOfRange {
                addr: addr as usize,
            }),
        }
    }
}

fn new_cpu(program: &[u16]) -> Cpu<Memory> {
    let mut mem = Memory::new();
    font::load(&mut mem).unwrap();
    let bytes: Vec<u8> = program.iter().flat_map(|w| w.to_be_bytes()).collect();
    mem.load(0x200, &bytes).unwrap();
    Cpu::with_seed(mem, 0x5EED)
}

fn run(cpu: &mut Cpu<Memory>, steps: usize) {
    let keypad = Keypad::new();
    for _ in 0..steps {
        cpu.step(&keypad).unwrap();
    }
}

#[test]
fn draw_scenario_lights_pixel() {
    // LD V0,0x12; LD I,0x228; DRW V0,V1,1
    let mut cpu = new_cpu(&[0x6012, 0xA228, 0xD011]);
    cpu.bus.set8(0x228, 0x80).unwrap();
    run(&mut cpu, 3);

    assert_eq!(cpu.display.pixel(0x12, 0), PIXEL_ON);
    assert_eq!(cpu.regs.v[FLAG], 0);
    assert_eq!(cpu.regs.pc, 0x206);
}

#[test]
fn pc_starts_at_program_and_advances_by_two() {
    let mut cpu = new_cpu(&[0x6001]);
    assert_eq!(cpu.regs.pc, 0x200);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x202);
}

#[test]
fn add_sets_carry_on_overflow() {
    let mut cpu = new_cpu(&[0x60FF, 0x6101, 0x8014]);
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.v[0], 0x00);
    assert_eq!(cpu.regs.v[FLAG], 1);
}

#[test]
fn add_without_overflow_clears_carry() {
    let mut cpu = new_cpu(&[0x6F01, 0x6010, 0x6120, 0x8014]);
    run(&mut cpu, 4);
    assert_eq!(cpu.regs.v[0], 0x30);
    assert_eq!(cpu.regs.v[FLAG], 0);
}

#[test]
fn sub_borrow_clears_flag_and_wraps() {
    let mut cpu = new_cpu(&[0x6001, 0x6102, 0x8015]);
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.v[0], 0xFF);
    assert_eq!(cpu.regs.v[FLAG], 0);
}

#[test]
fn sub_equal_operands_sets_no_borrow() {
    let mut cpu = new_cpu(&[0x6005, 0x6105, 0x8015]);
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.v[0], 0);
    assert_eq!(cpu.regs.v[FLAG], 1);
}

#[test]
fn subn_uses_swapped_operands() {
    let mut cpu = new_cpu(&[0x6003, 0x6110, 0x8017, 0x6203, 0x6301, 0x8237]);
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.v[0], 0x0D);
    assert_eq!(cpu.regs.v[FLAG], 1);
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.v[2], 0xFE);
    assert_eq!(cpu.regs.v[FLAG], 0);
}

#[test]
fn shr_moves_low_bit_into_flag() {
    let mut cpu = new_cpu(&[0x6003, 0x8006]);
    run(&mut cpu, 2);
    assert_eq!(cpu.regs.v[0], 0x01);
    assert_eq!(cpu.regs.v[FLAG], 1);
}

#[test]
fn shl_moves_bit_seven_into_flag() {
    let mut cpu = new_cpu(&[0x6081, 0x800E, 0x6140, 0x811E]);
    run(&mut cpu, 2);
    assert_eq!(cpu.regs.v[0], 0x02);
    assert_eq!(cpu.regs.v[FLAG], 1);
    run(&mut cpu, 2);
    assert_eq!(cpu.regs.v[1], 0x80);
    assert_eq!(cpu.regs.v[FLAG], 0);
}

#[test]
fn logic_ops() {
    let mut cpu = new_cpu(&[0x60F0, 0x613C, 0x8211, 0x8212, 0x8213, 0x8310]);
    run(&mut cpu, 2);
    cpu.regs.v[2] = 0xF0;
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.v[2], 0xF0 | 0x3C);
    cpu.regs.v[2] = 0xF0;
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.v[2], 0x30);
    cpu.regs.v[2] = 0xF0;
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.v[2], 0xCC);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.v[3], 0x3C);
}

#[test]
fn add_immediate_wraps_without_touching_flag() {
    let mut cpu = new_cpu(&[0x6F07, 0x60FE, 0x7003]);
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.v[0], 0x01);
    assert_eq!(cpu.regs.v[FLAG], 0x07);
}

#[test]
fn skips_add_two_more_to_pc() {
    let mut cpu = new_cpu(&[0x6042, 0x3042]);
    run(&mut cpu, 2);
    assert_eq!(cpu.regs.pc, 0x206);

    let mut cpu = new_cpu(&[0x6042, 0x4042]);
    run(&mut cpu, 2);
    assert_eq!(cpu.regs.pc, 0x204);

    let mut cpu = new_cpu(&[0x6007, 0x6107, 0x5010, 0x0000, 0x9010]);
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.pc, 0x208);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x20A);
}

#[test]
fn call_and_return_use_memory_stack() {
    // 0x200: CALL 0x300; 0x300: RET
    let mut cpu = new_cpu(&[0x2300]);
    cpu.bus.set16(0x300, 0x00EE).unwrap();

    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x300);
    assert_eq!(cpu.regs.sp, 2);
    assert_eq!(cpu.bus.get16(2).unwrap(), 0x202);

    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x202);
    assert_eq!(cpu.regs.sp, 0);
}

#[test]
fn nested_calls_grow_stack_upward() {
    let mut cpu = new_cpu(&[0x2300]);
    cpu.bus.set16(0x300, 0x2400).unwrap();
    cpu.bus.set16(0x400, 0x00EE).unwrap();
    cpu.bus.set16(0x302, 0x00EE).unwrap();

    run(&mut cpu, 2);
    assert_eq!(cpu.regs.sp, 4);
    assert_eq!(cpu.bus.get16(4).unwrap(), 0x302);
    run(&mut cpu, 2);
    assert_eq!(cpu.regs.pc, 0x202);
    assert_eq!(cpu.regs.sp, 0);
}

#[test]
fn jumps() {
    let mut cpu = new_cpu(&[0x1456]);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.pc, 0x456);

    let mut cpu = new_cpu(&[0x6010, 0xB300]);
    run(&mut cpu, 2);
    assert_eq!(cpu.regs.pc, 0x310);
}

#[test]
fn random_is_masked() {
    let mut cpu = new_cpu(&[0xC00F, 0xC100]);
    run(&mut cpu, 2);
    assert_eq!(cpu.regs.v[0] & 0xF0, 0);
    assert_eq!(cpu.regs.v[1], 0);
}

#[test]
fn random_is_reproducible_with_seed() {
    let mut a = new_cpu(&[0xC0FF, 0xC1FF, 0xC2FF]);
    let mut b = new_cpu(&[0xC0FF, 0xC1FF, 0xC2FF]);
    run(&mut a, 3);
    run(&mut b, 3);
    assert_eq!(a.regs.v, b.regs.v);
}

#[test]
fn drawing_twice_reports_collision_and_clears() {
    // LD I,0x300; DRW V0,V1,1; DRW V0,V1,1
    let mut cpu = new_cpu(&[0xA300, 0xD011, 0xD011]);
    cpu.bus.set8(0x300, 0xFF).unwrap();

    run(&mut cpu, 2);
    assert_eq!(cpu.regs.v[FLAG], 0);
    assert!((0..8).all(|x| cpu.display.pixel(x, 0) == PIXEL_ON));

    run(&mut cpu, 1);
    assert_eq!(cpu.regs.v[FLAG], 1);
    assert!(cpu.display.pixels().iter().all(|&p| p == PIXEL_OFF));
}

#[test]
fn draw_resets_stale_flag() {
    let mut cpu = new_cpu(&[0x6F01, 0xA300, 0xD011]);
    cpu.bus.set8(0x300, 0x80).unwrap();
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.v[FLAG], 0);
}

#[test]
fn draw_wraps_around_the_corner() {
    let mut cpu = new_cpu(&[0x603F, 0x611F, 0xA300, 0xD012]);
    cpu.bus.load(0x300, &[0xC0, 0xC0]).unwrap();
    run(&mut cpu, 4);
    assert_eq!(cpu.display.pixel(63, 31), PIXEL_ON);
    assert_eq!(cpu.display.pixel(0, 31), PIXEL_ON);
    assert_eq!(cpu.display.pixel(63, 0), PIXEL_ON);
    assert_eq!(cpu.display.pixel(0, 0), PIXEL_ON);
}

#[test]
fn extended_zero_height_draw_is_sixteen_by_sixteen() {
    // HIGH; LD I,0x300; DRW V0,V1,0
    let mut cpu = new_cpu(&[0x00FF, 0xA300, 0xD010]);
    cpu.bus.load(0x300, &[0xFF; 32]).unwrap();
    run(&mut cpu, 3);
    assert!(cpu.display.extended_mode());
    let lit = cpu.display.pixels().iter().filter(|&&p| p == PIXEL_ON).count();
    assert_eq!(lit, 256);
    assert_eq!(cpu.display.pixel(15, 15), PIXEL_ON);
    assert_eq!(cpu.display.pixel(16, 0), PIXEL_OFF);
}

#[test]
fn standard_zero_height_draw_draws_nothing() {
    let mut cpu = new_cpu(&[0x6F01, 0xA300, 0xD010]);
    cpu.bus.load(0x300, &[0xFF; 32]).unwrap();
    run(&mut cpu, 3);
    assert!(cpu.display.pixels().iter().all(|&p| p == PIXEL_OFF));
    assert_eq!(cpu.regs.v[FLAG], 0);
}

#[test]
fn mode_switch_does_not_clear() {
    let mut cpu = new_cpu(&[0xA300, 0xD011, 0x00FF, 0x00FE]);
    cpu.bus.set8(0x300, 0x80).unwrap();
    run(&mut cpu, 3);
    assert!(cpu.display.pixels().iter().all(|&p| p == PIXEL_OFF));
    run(&mut cpu, 1);
    assert_eq!(cpu.display.pixel(0, 0), PIXEL_ON);
}

#[test]
fn clear_and_scroll_opcodes() {
    let mut cpu = new_cpu(&[0xA300, 0xD011, 0x00C2, 0x00FB, 0x00FC, 0x00FC, 0x00E0]);
    cpu.bus.set8(0x300, 0x80).unwrap();
    run(&mut cpu, 3);
    assert_eq!(cpu.display.pixel(0, 2), PIXEL_ON);
    run(&mut cpu, 1);
    assert_eq!(cpu.display.pixel(4, 2), PIXEL_ON);
    run(&mut cpu, 1);
    assert_eq!(cpu.display.pixel(0, 2), PIXEL_ON);
    run(&mut cpu, 1);
    assert!(cpu.display.pixels().iter().all(|&p| p == PIXEL_OFF));

    cpu.display.draw_sprite(9, 9, &[0xFF]);
    run(&mut cpu, 1);
    assert!(cpu.display.pixels().iter().all(|&p| p == PIXEL_OFF));
}

#[test]
fn exit_opcode_is_a_clean_signal() {
    let mut cpu = new_cpu(&[0x00FD]);
    let flow = cpu.step(&Keypad::new()).unwrap();
    assert_eq!(flow, Flow::Exit);
}

#[test]
fn key_skips_follow_keypad() {
    let mut cpu = new_cpu(&[0x6005, 0xE09E, 0x0000, 0xE0A1]);
    let mut keypad = Keypad::new();
    keypad.press(5);
    cpu.step(&keypad).unwrap();
    cpu.step(&keypad).unwrap();
    assert_eq!(cpu.regs.pc, 0x206);
    cpu.step(&keypad).unwrap();
    assert_eq!(cpu.regs.pc, 0x208);
}

#[test]
fn key_skip_with_value_above_f_reads_released() {
    let mut cpu = new_cpu(&[0x6020, 0xE0A1]);
    let mut keypad = Keypad::new();
    keypad.keys = [true; 16];
    cpu.step(&keypad).unwrap();
    cpu.step(&keypad).unwrap();
    assert_eq!(cpu.regs.pc, 0x206);
}

#[test]
fn key_wait_stalls_until_a_key_is_pressed() {
    let mut cpu = new_cpu(&[0x6377, 0xF30A]);
    let mut keypad = Keypad::new();
    cpu.step(&keypad).unwrap();

    for _ in 0..5 {
        cpu.step(&keypad).unwrap();
        assert_eq!(cpu.regs.pc, 0x202);
        assert_eq!(cpu.regs.v[3], 0x77);
    }

    keypad.press(0xE);
    keypad.press(0x9);
    cpu.step(&keypad).unwrap();
    assert_eq!(cpu.regs.pc, 0x204);
    assert_eq!(cpu.regs.v[3], 0x9);
}

#[test]
fn timer_registers() {
    let mut cpu = new_cpu(&[0x6033, 0xF015, 0xF118, 0xF207]);
    run(&mut cpu, 4);
    assert_eq!(cpu.regs.timers.delay, 0x33);
    assert_eq!(cpu.regs.timers.sound, 0);
    assert_eq!(cpu.regs.v[2], 0x33);
}

#[test]
fn add_to_index_flags_past_0xfff() {
    let mut cpu = new_cpu(&[0xAFFE, 0x6001, 0xF01E, 0x6001, 0xF01E]);
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.i, 0xFFF);
    assert_eq!(cpu.regs.v[FLAG], 0);
    run(&mut cpu, 2);
    assert_eq!(cpu.regs.i, 0x1000);
    assert_eq!(cpu.regs.v[FLAG], 1);
}

#[test]
fn font_pointers() {
    let mut cpu = new_cpu(&[0x600A, 0xF029, 0x6007, 0xF030]);
    run(&mut cpu, 2);
    assert_eq!(cpu.regs.i, 0x100 + 0xA * 5);
    run(&mut cpu, 2);
    assert_eq!(cpu.regs.i, 0x150 + 7 * 10);
}

#[test]
fn bcd_store() {
    let mut cpu = new_cpu(&[0x60FE, 0xA300, 0xF033]);
    run(&mut cpu, 3);
    let mut digits = [0u8; 3];
    cpu.bus.read_into(0x300, &mut digits).unwrap();
    assert_eq!(digits, [2, 5, 4]);
    assert_eq!(cpu.regs.i, 0x300);
}

#[test]
fn register_block_store_and_load_are_inclusive() {
    let mut cpu = new_cpu(&[0xA300, 0xF255, 0xF365]);
    cpu.regs.v[..4].copy_from_slice(&[1, 2, 3, 4]);
    run(&mut cpu, 2);
    let mut stored = [0u8; 4];
    cpu.bus.read_into(0x300, &mut stored).unwrap();
    assert_eq!(stored, [1, 2, 3, 0]);
    assert_eq!(cpu.regs.i, 0x300);

    cpu.bus.load(0x300, &[9, 8, 7, 6]).unwrap();
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.v[..5], [9, 8, 7, 6, 0]);
}

#[test]
fn rpl_flags_round_trip_and_clamp_to_eight() {
    let mut cpu = new_cpu(&[0xFF75, 0x6000, 0x6700, 0x6900, 0xFF85]);
    for (i, r) in cpu.regs.v.iter_mut().enumerate() {
        *r = i as u8 + 1;
    }
    run(&mut cpu, 1);
    assert_eq!(cpu.rpl, [1, 2, 3, 4, 5, 6, 7, 8]);
    run(&mut cpu, 4);
    assert_eq!(cpu.regs.v[0], 1);
    assert_eq!(cpu.regs.v[7], 8);
    assert_eq!(cpu.regs.v[9], 0);
}

#[test]
fn invalid_opcodes_report_word_and_pc() {
    for word in [0x0123u16, 0x5121, 0x8128, 0xE1FF, 0xF1FF] {
        let mut cpu = new_cpu(&[0x6000, word]);
        run(&mut cpu, 1);
        match cpu.step(&Keypad::new()) {
            Err(Error::InvalidOpcode { opcode, pc }) => {
                assert_eq!(opcode, word);
                assert_eq!(pc, 0x202);
            }
            other => panic!("expected invalid opcode for {:04X}, got {:?}", word, other),
        }
        assert_eq!(cpu.regs.pc, 0x202);
    }
}

#[test]
fn fetch_past_end_of_memory_is_out_of_range() {
    let mut cpu = new_cpu(&[0x1FFF]);
    run(&mut cpu, 1);
    assert!(matches!(
        cpu.step(&Keypad::new()),
        Err(Error::OutOfRange { .. })
    ));
    assert_eq!(cpu.regs.pc, 0xFFF);
}

#[test]
fn faulting_draw_leaves_screen_and_flag_alone() {
    let mut cpu = new_cpu(&[0x6F07, 0xAFFE, 0xD01F]);
    run(&mut cpu, 2);
    assert!(matches!(
        cpu.step(&Keypad::new()),
        Err(Error::OutOfRange { .. })
    ));
    assert_eq!(cpu.regs.v[FLAG], 7);
    assert_eq!(cpu.regs.pc, 0x204);
    assert!(cpu.display.pixels().iter().all(|&p| p == PIXEL_OFF));
}

#[test]
fn small_bus_uses_default_accessors() {
    let mut bus = TestBus::new(0x300);
    bus.load(0x200, &[0x22, 0x10, 0x00, 0x00]).unwrap();
    bus.load(0x210, &[0x00, 0xEE]).unwrap();
    let mut cpu = Cpu::with_seed(bus, 1);
    let keypad = Keypad::new();

    cpu.step(&keypad).unwrap();
    assert_eq!(cpu.regs.pc, 0x210);
    assert_eq!(cpu.bus.get16(2).unwrap(), 0x202);
    cpu.step(&keypad).unwrap();
    assert_eq!(cpu.regs.pc, 0x202);

    cpu.regs.i = 0x2FF;
    assert!(cpu.bus.load(cpu.regs.i as usize, &[1, 2]).is_err());
    assert_eq!(cpu.bus.get8(0x2FF).unwrap(), 0);
}

#[test]
fn bcd_near_end_of_memory_is_all_or_nothing() {
    let mut cpu = new_cpu(&[0x60FF, 0xAFFE, 0xF033]);
    run(&mut cpu, 2);
    assert!(cpu.step(&Keypad::new()).is_err());
    assert_eq!(cpu.bus.get8(0xFFE).unwrap(), 0);
    assert_eq!(cpu.bus.get8(0xFFF).unwrap(), 0);
}

#[test]
fn reset_restores_power_on_registers() {
    let mut cpu = new_cpu(&[0x6042, 0x00FF, 0xA123]);
    run(&mut cpu, 3);
    cpu.reset();
    assert_eq!(cpu.regs.pc, 0x200);
    assert_eq!(cpu.regs.v[0], 0);
    assert_eq!(cpu.regs.i, 0);
    assert!(!cpu.display.extended_mode());
    assert_eq!(cpu.bus.get16(0x200).unwrap(), 0x6042);
}
