//! Dart sources emitted for a new game.
//!
//! Math games get a stateful widget wired to the math-help scope; every other subject
//! gets a plain stateless widget.

use crate::subject::Subject;
use crate::unit::ScaffoldUnit;

/// `presentation/<slug>_game.dart`.
#[must_use]
pub fn presentation(unit: &ScaffoldUnit) -> String {
    let class_name = unit.class_name();
    if unit.subject() != Subject::Math {
        return format!(
            r"import 'package:flutter/material.dart';

import '../../../../../domain/game_interface.dart';

class {class_name} extends StatelessWidget implements GameWidget {{
  @override
  final ValueChanged<GameResult> onComplete;

  const {class_name}({{super.key, required this.onComplete}});

  @override
  Widget build(BuildContext context) {{
    return Center(
      child: FilledButton(
        onPressed: () => onComplete(const GameResult(stars: 1, pointsEarned: 5)),
        child: const Text('TODO: Implement {class_name}'),
      ),
    );
  }}
}}
"
        );
    }

    format!(
        r"import 'package:flutter/material.dart';

import '../../../../../domain/game_interface.dart';
import '../../../../../math_help/application/math_help_controller.dart';
import '../../../../../math_help/application/math_help_scope.dart';
import '../../../../../math_help/domain/math_help_context.dart';
import '../../../../../math_help/domain/math_topic_family.dart';

class {class_name} extends StatefulWidget implements GameWidget {{
  @override
  final ValueChanged<GameResult> onComplete;

  const {class_name}({{super.key, required this.onComplete}});

  @override
  State<{class_name}> createState() => _{class_name}State();
}}

class _{class_name}State extends State<{class_name}> {{
  MathHelpController? _mathHelpController;
  bool _helpContextPublished = false;

  @override
  void didChangeDependencies() {{
    super.didChangeDependencies();
    _mathHelpController ??= MathHelpScope.maybeOf(context);
    if (_helpContextPublished) return;
    _helpContextPublished = true;
    _publishMathHelpContext();
  }}

  @override
  void dispose() {{
    _mathHelpController?.clearContext();
    super.dispose();
  }}

  @override
  Widget build(BuildContext context) {{
    return Center(
      child: FilledButton(
        onPressed: _completeGame,
        child: const Text('TODO: Implement {class_name}'),
      ),
    );
  }}

  void _publishMathHelpContext() {{
    _mathHelpController?.setContext(
      MathHelpContext(
        topicFamily: MathTopicFamily.arithmetic,
        operation: 'addition',
        operands: const [1, 2],
        correctAnswer: 3,
        label: 'TODO: Sett hjelpetekst for oppgaven',
      ),
    );
  }}

  void _completeGame() {{
    _mathHelpController?.clearContext();
    widget.onComplete(const GameResult(stars: 1, pointsEarned: 5));
  }}
}}
"
    )
}

/// `domain/<slug>_engine.dart`.
#[must_use]
pub fn domain(unit: &ScaffoldUnit) -> String {
    const_class(&unit.engine_class_name())
}

/// `application/<slug>_session_controller.dart`.
#[must_use]
pub fn application(unit: &ScaffoldUnit) -> String {
    const_class(&unit.controller_class_name())
}

fn const_class(name: &str) -> String {
    format!("class {name} {{\n  const {name}();\n}}\n")
}

/// Widget test for the presentation file.
#[must_use]
pub fn test(unit: &ScaffoldUnit, package_name: &str) -> String {
    let class_name = unit.class_name();
    let subject = unit.subject();
    let tier = unit.tier();
    let slug = unit.slug();
    let game_import = format!(
        "import 'package:{package_name}/features/game/games/{subject}/trinn{tier}/{slug}/presentation/{slug}_game.dart';"
    );

    if subject != Subject::Math {
        return format!(
            r"import 'package:flutter/material.dart';
import 'package:flutter_test/flutter_test.dart';
import 'package:{package_name}/features/game/domain/game_interface.dart';
{game_import}

void main() {{
  testWidgets('{class_name} emits completion result', (tester) async {{
    GameResult? result;

    await tester.pumpWidget(
      MaterialApp(
        home: Scaffold(
          body: {class_name}(onComplete: (value) => result = value),
        ),
      ),
    );

    await tester.tap(find.byType(FilledButton));
    await tester.pump();

    expect(result, isNotNull);
    expect(result!.stars, 1);
    expect(result!.pointsEarned, 5);
  }});
}}
"
        );
    }

    format!(
        r"import 'package:flutter/material.dart';
import 'package:flutter_test/flutter_test.dart';
import 'package:{package_name}/features/game/domain/game_interface.dart';
{game_import}
import 'package:{package_name}/features/game/math_help/application/math_help_controller.dart';
import 'package:{package_name}/features/game/math_help/application/math_help_scope.dart';

void main() {{
  testWidgets('{class_name} emits completion result and clears math help', (tester) async {{
    final helpController = MathHelpController();
    GameResult? result;

    await tester.pumpWidget(
      MaterialApp(
        home: MathHelpScope(
          controller: helpController,
          child: Scaffold(
            body: {class_name}(onComplete: (value) => result = value),
          ),
        ),
      ),
    );

    expect(helpController.context, isNotNull);

    await tester.tap(find.byType(FilledButton));
    await tester.pump();

    expect(result, isNotNull);
    expect(result!.stars, 1);
    expect(result!.pointsEarned, 5);
    expect(helpController.context, isNull);
  }});
}}
"
    )
}
